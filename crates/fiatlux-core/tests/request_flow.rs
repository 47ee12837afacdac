//! Integration tests across the codec modules.

use fiatlux_core::{
    Query, WallTime,
    http::{ContentHeaders, ContentType, ResponseHeaders, find_header_end, parse_request_line, split_target},
    sntp::{self, NTP_PACKET_SIZE, NTP_UNIX_OFFSET},
};
use heapless::String;

// -----------------------------------------------------------------------------
// HTTP
// -----------------------------------------------------------------------------

#[test]
fn request_bytes_to_query_values() {
    let raw = b"GET /led?red=12&name=A%20B HTTP/1.1\r\nHost: strip\r\n\r\ntrailing";
    let end = find_header_end(raw).unwrap();
    let header = core::str::from_utf8(&raw[..end]).unwrap();

    let (_, target, rest) = parse_request_line(header).unwrap();
    assert!(rest.starts_with("Host: strip"));

    let (path, query) = split_target(target);
    assert_eq!(path, "/led");
    let query = Query::new(query.unwrap());
    assert_eq!(query.get_u32("red"), Some(12));
    assert_eq!(query.get_decoded::<8>("name").unwrap().unwrap().as_str(), "A B");
}

#[test]
fn json_response_head() {
    let mut out: String<128> = String::new();
    ResponseHeaders::success()
        .with_content(ContentHeaders::new(ContentType::Json).with_length(2))
        .write_to(&mut out)
        .unwrap();
    assert_eq!(
        out.as_str(),
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n"
    );
}

// -----------------------------------------------------------------------------
// Time sync
// -----------------------------------------------------------------------------

#[test]
fn server_reply_to_local_time() {
    let mut request = [0u8; NTP_PACKET_SIZE];
    sntp::build_request(&mut request);

    // answer as a stratum 2 server: 2024-01-01T06:30:00.500Z
    let mut reply = request;
    reply[0] = 0x24;
    reply[1] = 2;
    let ntp_secs = u32::try_from(1_704_090_600 + NTP_UNIX_OFFSET).unwrap();
    reply[40..44].copy_from_slice(&ntp_secs.to_be_bytes());
    reply[44..48].copy_from_slice(&0x8000_0000u32.to_be_bytes());

    let time = sntp::parse_response(&reply).unwrap();
    let local = WallTime::from_unix_millis(time.as_millis(), 2 * 3600);
    assert_eq!((local.hour, local.minute, local.second), (8, 30, 0));
    assert_eq!(local.millis, 500);
}
