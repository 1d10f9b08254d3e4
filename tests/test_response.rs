use lantern::http::response::{ResponseBuilder, StatusCode};
use lantern::http::writer::{serialize_response, serialize_unbounded};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", "test")
        .header("Content-Type", "text/plain")
        .header("Connection", "close")
        .body(b"test".to_vec())
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Server", "Content-Type", "Connection", "Content-Length"]);
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers[0], ("Content-Type".to_string(), "text/html".to_string()));
    assert_eq!(response.header("X-Custom"), Some("value"));
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    assert_eq!(response.content_length(), Some(body.len() as u64));
}

#[test]
fn test_response_builder_preserves_explicit_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .build();

    assert_eq!(response.content_length(), Some(999));
    assert!(response.body.is_empty());
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::NotFound).build();

    assert_eq!(response.body.len(), 0);
    assert_eq!(response.header("Content-Length"), Some("0"));
}

#[test]
fn test_serialize_wire_format() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Content-Type", "text/plain")
        .body(b"gone".to_vec())
        .build();

    let bytes = serialize_unbounded(&response);
    assert_eq!(
        &bytes[..],
        b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\ngone"
    );
}

#[test]
fn test_serialize_binary_body() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(vec![0, 159, 146, 150, 255])
        .build();

    let bytes = serialize_response(&response, 4096).unwrap();
    assert!(bytes.ends_with(&[b'\n', 0, 159, 146, 150, 255]));
}

#[test]
fn test_serialize_header_overflow() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", "x".repeat(5000))
        .build();

    assert!(serialize_response(&response, 4096).is_err());
    assert!(serialize_response(&response, 8192).is_ok());
}
