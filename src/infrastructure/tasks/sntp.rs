//! SNTP client task
//!
//! Queries the configured NTP server and feeds the wall clock. Resyncs
//! hourly, retries sooner after a failure.

use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpAddress, Stack};
use embassy_time::{Duration, Timer, with_timeout};
use log::{debug, info, warn};

use fiatlux_core::sntp::{self, NTP_PACKET_SIZE, NTP_PORT, SntpError, UnixTime};

use crate::{config, domain::ports::WallClock, infrastructure::services::ClockService};

#[derive(Debug)]
enum SyncError {
    Dns,
    Bind,
    Send,
    Recv,
    Timeout,
    Packet(SntpError),
}

impl From<SntpError> for SyncError {
    fn from(e: SntpError) -> Self {
        SyncError::Packet(e)
    }
}

#[embassy_executor::task]
pub async fn sntp_task(stack: Stack<'static>, clock: ClockService) {
    info!("sntp: using {}", config::CLOCK.ntp_server);

    loop {
        let wait_secs = match sync_once(stack).await {
            Ok(time) => {
                clock.set_unix_time(time);
                let now = clock.now();
                info!(
                    "sntp: clock set to {:02}:{:02}:{:02}",
                    now.hour, now.minute, now.second
                );
                config::CLOCK.resync_interval_secs
            }
            Err(e) => {
                warn!("sntp: sync failed: {:?}", e);
                config::CLOCK.retry_interval_secs
            }
        };
        Timer::after(Duration::from_secs(wait_secs)).await;
    }
}

async fn sync_once(stack: Stack<'static>) -> Result<UnixTime, SyncError> {
    let server = resolve(stack, config::CLOCK.ntp_server).await?;

    let mut rx_meta = [PacketMetadata::EMPTY; 2];
    let mut rx_buffer = [0u8; 128];
    let mut tx_meta = [PacketMetadata::EMPTY; 2];
    let mut tx_buffer = [0u8; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(NTP_PORT).map_err(|_| SyncError::Bind)?;

    let mut packet = [0u8; NTP_PACKET_SIZE];
    sntp::build_request(&mut packet);
    socket
        .send_to(&packet, (server, NTP_PORT))
        .await
        .map_err(|_| SyncError::Send)?;
    debug!("sntp: request sent to {}", server);

    let timeout = Duration::from_millis(config::CLOCK.response_timeout_ms);
    let (len, _) = with_timeout(timeout, socket.recv_from(&mut packet))
        .await
        .map_err(|_| SyncError::Timeout)?
        .map_err(|_| SyncError::Recv)?;

    Ok(sntp::parse_response(&packet[..len])?)
}

async fn resolve(stack: Stack<'static>, host: &str) -> Result<IpAddress, SyncError> {
    if let Ok(ip) = host.parse::<embassy_net::Ipv4Address>() {
        return Ok(IpAddress::Ipv4(ip));
    }
    let addresses = stack
        .dns_query(host, DnsQueryType::A)
        .await
        .map_err(|_| SyncError::Dns)?;
    addresses.first().copied().ok_or(SyncError::Dns)
}
