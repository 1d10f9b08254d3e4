use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ServeError;
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Status line, headers and the blank separator line.
fn encode_head(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256 + resp.body.len());

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(b"\r\n");
    buf
}

/// Serializes a response, refusing header blocks longer than `max_head_bytes`.
pub fn serialize_response(resp: &Response, max_head_bytes: usize) -> Result<Bytes, ServeError> {
    let mut buf = encode_head(resp);
    if buf.len() > max_head_bytes {
        return Err(ServeError::HeaderFormattingOverflow(buf.len()));
    }
    buf.put_slice(&resp.body);
    Ok(buf.freeze())
}

/// Serializes a response with no bound on the header block.
pub fn serialize_unbounded(resp: &Response) -> Bytes {
    let mut buf = encode_head(resp);
    buf.put_slice(&resp.body);
    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(buffer: Bytes) -> Self {
        Self { buffer, written: 0 }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
