//! HTTP/1.1 text handling shared by the firmware server.
//!
//! Everything here works on already received bytes, socket I/O lives in the
//! firmware crate.

use core::fmt::Write;

pub type StatusCode = u16;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Request Entity Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    TextHtml,
    TextPlain,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextHtml => "text/html",
            ContentType::TextPlain => "text/plain",
        }
    }
}

/// Text Encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
        }
    }
}

/// HTTP Content Headers.
#[derive(Debug, Clone, Copy)]
pub struct ContentHeaders {
    content_type: ContentType,
    content_length: Option<usize>,
    text_encoding: Option<TextEncoding>,
}

impl ContentHeaders {
    pub const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: None,
            text_encoding: None,
        }
    }

    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }

    #[must_use]
    pub const fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = Some(text_encoding);
        self
    }

    fn write_to(&self, writer: &mut impl Write) -> core::fmt::Result {
        write!(writer, "Content-Type: {}", self.content_type.as_str())?;
        if let Some(text_encoding) = self.text_encoding {
            write!(writer, "; charset={}", text_encoding.as_str())?;
        }
        write!(writer, "\r\n")?;
        if let Some(content_length) = self.content_length {
            write!(writer, "Content-Length: {}\r\n", content_length)?;
        }
        Ok(())
    }
}

/// Response Headers.
///
/// The server closes every connection after one response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHeaders {
    status: StatusCode,
    content: Option<ContentHeaders>,
}

impl ResponseHeaders {
    pub const fn from_code(status: StatusCode) -> Self {
        Self {
            status,
            content: None,
        }
    }

    pub const fn success() -> Self {
        Self::from_code(200)
    }

    pub const fn not_found() -> Self {
        Self::from_code(404)
    }

    pub const fn method_not_allowed() -> Self {
        Self::from_code(405)
    }

    #[must_use]
    pub const fn with_content(mut self, content: ContentHeaders) -> Self {
        self.content = Some(content);
        self
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Write the status line and headers, including the blank line.
    pub fn write_to(&self, writer: &mut impl Write) -> core::fmt::Result {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        match &self.content {
            Some(content) => content.write_to(writer)?,
            None => write!(writer, "Content-Length: 0\r\n")?,
        }
        write!(writer, "Connection: close\r\n\r\n")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            _ => return None,
        })
    }
}

/// Parse the request line from the header string.
///
/// Returns the method, request target, and the rest of the header string.
pub fn parse_request_line(header_str: &str) -> Option<(HttpMethod, &str, &str)> {
    let line_end = header_str.find("\r\n").unwrap_or(header_str.len());
    let first_line = &header_str[..line_end];
    let mut parts = first_line.split_whitespace();
    let method = parts.next().and_then(HttpMethod::parse)?;
    let target = parts.next()?;
    let rest = header_str.get(line_end + 2..).unwrap_or("");

    Some((method, target, rest))
}

/// Split a request target into the path and the raw query string.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Position right after the `\r\n\r\n` that ends the headers.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// Find the content length in the header string.
pub fn find_content_length(header: &str) -> Option<u32> {
    const TARGET: &str = "content-length:";
    for line in header.lines() {
        let Some(name) = line.get(..TARGET.len()) else {
            continue;
        };
        if name.eq_ignore_ascii_case(TARGET) {
            return line[TARGET.len()..].trim().parse::<u32>().ok();
        }
    }
    None
}

/// Write the body used for unknown URIs.
pub fn write_not_found_message(writer: &mut impl Write, uri: &str) -> core::fmt::Result {
    write!(writer, "{} does not exist!", uri)
}
