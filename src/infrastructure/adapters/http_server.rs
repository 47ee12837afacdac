//! Runs an `HttpServer` with socket buffers on the calling task's stack.

use embassy_net::Stack;
use embassy_time::Duration;
use log::info;

use crate::config;
use crate::core::net::http::{HttpHandler, HttpServer};

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 2048;

/// Serve `handler` on the configured port, forever.
pub async fn run_http_server<H: HttpHandler>(stack: Stack<'static>, handler: &H) -> ! {
    let timeout = Duration::from_secs(config::HTTP.socket_timeout_secs);
    let server = HttpServer::new(handler, timeout);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    info!("http: listening on port {}", config::HTTP.port);
    server
        .listen_and_serve(stack, config::HTTP.port, &mut rx_buffer, &mut tx_buffer)
        .await
}
