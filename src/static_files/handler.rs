//! The request pipeline: raw bytes in, response bytes out.
//!
//! parse -> split and decode the target -> resolve -> assemble -> serialize.
//! The first failure short-circuits to the error responder. Nothing is
//! retried and nothing is kept between calls, so one handler can be shared
//! by any number of concurrent connections.

use std::sync::Arc;
use std::time::SystemTime;

use bytes::Bytes;

use crate::config::StaticConfig;
use crate::error::ServeError;
use crate::http::codec::{QueryLimits, Target, parse_target};
use crate::http::mime::MimeTable;
use crate::http::parser::{ParseLimits, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::{serialize_response, serialize_unbounded};
use crate::static_files::error_page::ErrorResponder;
use crate::static_files::resolver::{ResolvedResource, Resolver};

/// What goes back on the wire for one request.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: StatusCode,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct StaticHandler {
    config: Arc<StaticConfig>,
    parse_limits: ParseLimits,
    query_limits: QueryLimits,
    resolver: Resolver,
    mime: MimeTable,
    errors: ErrorResponder,
}

impl StaticHandler {
    pub fn new(config: Arc<StaticConfig>) -> Self {
        Self {
            parse_limits: ParseLimits::from(&*config),
            query_limits: QueryLimits::from(&*config),
            resolver: Resolver::from_config(&config),
            mime: MimeTable::new(config.mime_types.clone()),
            errors: ErrorResponder::from_config(&config),
            config,
        }
    }

    /// Runs the whole pipeline. Always produces a complete response.
    pub fn handle(&self, raw: &[u8]) -> Outcome {
        let served = self.serve(raw).and_then(|resp| {
            let bytes = serialize_response(&resp, self.config.max_response_header_bytes)?;
            Ok(Outcome {
                status: resp.status,
                bytes,
            })
        });

        served.unwrap_or_else(|err| self.respond_error(err))
    }

    /// Turns a pipeline failure into its error page. Error responses are
    /// not subject to the header limit.
    pub fn respond_error(&self, err: ServeError) -> Outcome {
        let status = err.status();
        if status == StatusCode::InternalServerError {
            tracing::error!(error = %err, "request failed");
        } else {
            tracing::warn!(error = %err, status = status.as_u16(), "request rejected");
        }

        let resp = self.errors.respond(status);
        Outcome {
            status,
            bytes: serialize_unbounded(&resp),
        }
    }

    /// Parses the request and splits/decodes its target.
    pub fn interpret(&self, raw: &[u8]) -> Result<(Request, Target), ServeError> {
        let request = parse_http_request(raw, &self.parse_limits)?;
        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            version = %request.version(),
            headers = request.headers.len(),
            "request parsed"
        );

        let target = parse_target(request.path(), &self.query_limits);
        tracing::debug!(
            path = %target.path,
            params = target.query.len(),
            "target decoded"
        );

        Ok((request, target))
    }

    /// Produces the success response, or the first error hit on the way.
    pub fn serve(&self, raw: &[u8]) -> Result<Response, ServeError> {
        let (request, target) = self.interpret(raw)?;
        let resource = self.resolver.resolve(&target.path, &self.mime)?;

        tracing::info!(
            method = %request.method(),
            path = %request.path(),
            file = %resource.filesystem_path,
            size = resource.size_bytes,
            content_type = %resource.content_type,
            "serving file"
        );

        Ok(self.assemble(request.method(), resource))
    }

    /// Builds the 200 response. HEAD keeps the real `Content-Length` but
    /// drops the body.
    pub fn assemble(&self, method: Method, resource: ResolvedResource) -> Response {
        let body = match method {
            Method::HEAD => Vec::new(),
            Method::GET | Method::POST => resource.contents,
        };

        ResponseBuilder::new(StatusCode::Ok)
            .header("Date", httpdate::fmt_http_date(SystemTime::now()))
            .header("Server", self.config.server_name.as_str())
            .header("Content-Type", resource.content_type)
            .header("Content-Length", resource.size_bytes.to_string())
            .header("Connection", "close")
            .body(body)
            .build()
    }
}
