use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;
use log::{debug, warn};

use super::{HttpResult, connection::HttpConnection};

pub(crate) trait HttpHandler {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult;
}

/// Serves one connection at a time, closing it after a single response.
pub(crate) struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
    timeout: Duration,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub(crate) fn new(handler: &'a T, timeout: Duration) -> Self {
        Self { handler, timeout }
    }

    pub(crate) async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> ! {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(self.timeout));

            if let Err(e) = socket.accept(port).await {
                warn!("http: accept error: {:?}", e);
                continue;
            }

            let mut conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(e) => {
                    debug!("http: connection startup error: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = self.handler.handle_request(&mut conn).await {
                warn!("http: connection error: {:?}", e);
            }
            if let Err(e) = conn.close().await {
                debug!("http: close error: {:?}", e);
            }
        }
    }
}
