use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use serde::Serialize;

use fiatlux_core::{
    Query,
    http::{
        ContentHeaders,
        ContentType,
        HttpMethod,
        ResponseHeaders,
        TextEncoding,
        find_header_end,
        parse_request_line,
        split_target,
        write_not_found_message,
    },
};

use super::{Error, HttpResult};

const HEADER_BUFFER_SIZE: usize = 1024;
const RESPONSE_HEAD_SIZE: usize = 256;
const BODY_BUFFER_SIZE: usize = 512;
const TARGET_SIZE: usize = 256;
const STREAM_CHUNK_SIZE: usize = 1024;

/// HTTP connection context
pub(crate) struct HttpConnection<'a> {
    pub method: HttpMethod,
    /// Request target, path and query
    pub target: String<TARGET_SIZE>,

    socket: TcpSocket<'a>,
    head_buf: String<RESPONSE_HEAD_SIZE>,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request head from a socket.
    ///
    /// Request bodies are not read, every endpoint is a GET.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = [0u8; HEADER_BUFFER_SIZE];
        let header_end = read_heading(&mut header_buf, &mut socket).await?;

        let header_str =
            core::str::from_utf8(&header_buf[..header_end]).map_err(|_| Error::Parse)?;
        let (method, raw_target, _rest_headers) =
            parse_request_line(header_str).ok_or(Error::Parse)?;
        let target = String::try_from(raw_target).map_err(|()| Error::BufferOverflow)?;

        Ok(Self {
            method,
            target,
            socket,
            head_buf: String::new(),
            body_buf: Vec::new(),
        })
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, split_target(&self.target).0)
    }

    /// Query part of the request target
    pub(crate) fn query(&self) -> Query<'_> {
        split_target(&self.target)
            .1
            .map_or(Query::empty(), Query::new)
    }

    /// Write the headers to the connection
    pub(crate) async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        self.head_buf.clear();
        headers.write_to(&mut self.head_buf)?;
        self.socket.write_all(self.head_buf.as_bytes()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Write the body to the connection
    pub(crate) async fn write_body(&mut self, body: &[u8]) -> HttpResult {
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
        }
        self.socket.flush().await?;
        Ok(())
    }

    /// Write a UTF-8 text response
    pub(crate) async fn write_text(
        &mut self,
        headers: ResponseHeaders,
        content_type: ContentType,
        body: &str,
    ) -> HttpResult {
        let content = ContentHeaders::new(content_type)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(body.len());
        self.write_headers(&headers.with_content(content)).await?;
        self.write_body(body.as_bytes()).await
    }

    /// Write JSON to the connection
    ///
    /// Writes both headers and body.
    pub(crate) async fn write_json<T: Serialize>(&mut self, data: &T) -> HttpResult {
        self.body_buf.clear();
        self.body_buf
            .resize_default(BODY_BUFFER_SIZE)
            .map_err(|()| Error::BufferOverflow)?;
        let n = fiatlux_strip::view::to_json(data, self.body_buf.as_mut_slice())
            .map_err(|_| Error::BufferOverflow)?;
        self.body_buf.truncate(n);

        let headers = ResponseHeaders::success()
            .with_content(ContentHeaders::new(ContentType::Json).with_length(n));
        self.write_headers(&headers).await?;
        self.socket.write_all(self.body_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Answer with 404 and the unknown URI
    pub(crate) async fn write_not_found(&mut self) -> HttpResult {
        let mut body = String::<{ TARGET_SIZE + 16 }>::new();
        write_not_found_message(&mut body, &self.target)?;
        self.write_text(ResponseHeaders::not_found(), ContentType::TextPlain, &body)
            .await
    }

    /// Send a bodyless status response
    pub(crate) async fn write_status(&mut self, headers: ResponseHeaders) -> HttpResult {
        self.write_headers(&headers).await
    }

    /// Close the connection after the response is out
    pub(crate) async fn close(mut self) -> HttpResult {
        self.socket.close();
        self.socket.flush().await?;
        Ok(())
    }
}

/// Read the start line and headers from the socket.
///
/// Returns the position right after the blank line ending the headers.
async fn read_heading(buf: &mut [u8], socket: &mut TcpSocket<'_>) -> Result<usize, Error> {
    let mut header_len = 0;
    loop {
        let n = socket.read(&mut buf[header_len..]).await?;
        if n == 0 {
            return Err(Error::NoData);
        }
        header_len += n;
        if let Some(end) = find_header_end(&buf[..header_len]) {
            return Ok(end);
        }
        if header_len >= buf.len() {
            return Err(Error::BufferOverflow);
        }
    }
}
