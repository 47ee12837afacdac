//! SNTP (RFC 4330) client packet codec.

pub const NTP_PORT: u16 = 123;
pub const NTP_PACKET_SIZE: usize = 48;

/// Seconds between the NTP era start (1900-01-01) and the unix epoch.
pub const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// LI = 0, VN = 4, Mode = 3 (client)
const CLIENT_HEADER: u8 = 0b00_100_011;
const MODE_SERVER: u8 = 4;
const TRANSMIT_TIMESTAMP_OFFSET: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SntpError {
    Truncated,
    NotServer,
    /// Stratum 0, the server asks us to back off
    KissOfDeath,
    BeforeUnixEpoch,
}

/// Time since the unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnixTime {
    pub secs: u64,
    pub millis: u16,
}

impl UnixTime {
    pub const fn as_millis(&self) -> u64 {
        self.secs * 1000 + self.millis as u64
    }
}

/// Fill `buf` with a client request.
pub fn build_request(buf: &mut [u8; NTP_PACKET_SIZE]) {
    buf.fill(0);
    buf[0] = CLIENT_HEADER;
}

/// Extract the server transmit time from a response.
pub fn parse_response(buf: &[u8]) -> Result<UnixTime, SntpError> {
    if buf.len() < NTP_PACKET_SIZE {
        return Err(SntpError::Truncated);
    }
    if buf[0] & 0b111 != MODE_SERVER {
        return Err(SntpError::NotServer);
    }
    if buf[1] == 0 {
        return Err(SntpError::KissOfDeath);
    }

    let ts = &buf[TRANSMIT_TIMESTAMP_OFFSET..NTP_PACKET_SIZE];
    let secs = u64::from(u32::from_be_bytes([ts[0], ts[1], ts[2], ts[3]]));
    let fraction = u64::from(u32::from_be_bytes([ts[4], ts[5], ts[6], ts[7]]));

    let secs = secs
        .checked_sub(NTP_UNIX_OFFSET)
        .ok_or(SntpError::BeforeUnixEpoch)?;
    #[allow(clippy::cast_possible_truncation)]
    let millis = ((fraction * 1000) >> 32) as u16;

    Ok(UnixTime { secs, millis })
}
