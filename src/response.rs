use std::time::SystemTime;

/// Fixed identifying string sent in the `Server` header.
pub const SERVER_NAME: &str = "wafer/0.1";

/// Build the header block sent ahead of any body bytes.
///
/// Field order is fixed: status line, `Date`, `Server`, `Content-Type`,
/// `Content-Length`, `Connection: close`, blank line. Every line ends in
/// CRLF and no other headers are ever emitted.
pub fn build_headers(
    status: u16,
    message: &str,
    content_type: &str,
    content_length: usize,
) -> String {
    let date = httpdate::fmt_http_date(SystemTime::now());
    format!(
        "HTTP/1.1 {status} {message}\r\n\
         Date: {date}\r\n\
         Server: {SERVER_NAME}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {content_length}\r\n\
         Connection: close\r\n\
         \r\n"
    )
}

/// Minimal HTML body for error responses.
pub fn error_body(status: u16, message: &str) -> String {
    format!("<html><body><h1>{status} {message}</h1></body></html>")
}
