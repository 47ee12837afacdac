#![allow(clippy::unreadable_literal)]

pub(crate) struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub(crate) struct DeviceConfig {
    pub hostname: &'static str,
}

pub(crate) struct StripsConfig {
    /// GPIO numbers of the strip data lines, also used in default names
    pub gpios: [u8; STRIP_COUNT],
    /// LED count of a strip without a stored record
    pub default_led_count: u16,
}

pub(crate) struct ClockConfig {
    pub ntp_server: &'static str,
    pub utc_offset_secs: i32,
    pub resync_interval_secs: u64,
    pub retry_interval_secs: u64,
    pub response_timeout_ms: u64,
}

pub(crate) struct StorageConfig {
    pub write_debounce_ms: u64,
    /// Base address of the `strips` partition (defined in partitions.csv)
    pub partition_offset: u32,
}

pub(crate) struct HttpConfig {
    pub port: u16,
    pub socket_timeout_secs: u64,
}

/// Pixel buffer capacity of every strip
pub const MAX_LEDS: usize = 300;

/// Strips driven by the controller, one RMT channel each
pub const STRIP_COUNT: usize = 2;

pub(crate) const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub(crate) const DEVICE: DeviceConfig = DeviceConfig {
    hostname: "fiatlux",
};

pub(crate) const STRIPS: StripsConfig = StripsConfig {
    gpios: [25, 26],
    default_led_count: 60,
};

pub(crate) const CLOCK: ClockConfig = ClockConfig {
    ntp_server: "pool.ntp.org",
    utc_offset_secs: 3600,
    resync_interval_secs: 3600,
    retry_interval_secs: 30,
    response_timeout_ms: 5000,
};

pub(crate) const STORAGE: StorageConfig = StorageConfig {
    write_debounce_ms: 5000,
    partition_offset: 0x31_0000,
};

pub(crate) const HTTP: HttpConfig = HttpConfig {
    port: 80,
    socket_timeout_secs: 30,
};

/// Data pins in `STRIPS.gpios` order
#[macro_export]
macro_rules! strip_pins {
    ($p:expr) => {
        ($p.GPIO25, $p.GPIO26)
    };
}
