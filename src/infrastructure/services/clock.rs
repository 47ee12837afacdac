use core::cell::Cell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_time::Instant;

use fiatlux_core::{WallTime, sntp::UnixTime};

use crate::{config, domain::ports::WallClock};

/// Unix milliseconds at the moment of the last SNTP sync
#[derive(Clone, Copy)]
struct SyncPoint {
    unix_millis: u64,
    at: Instant,
}

static SYNC_POINT: Mutex<CriticalSectionRawMutex, Cell<Option<SyncPoint>>> =
    Mutex::new(Cell::new(None));

/// Local time from the last SNTP sync plus elapsed uptime.
///
/// Until the first sync the clock counts from boot.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockService;

impl ClockService {
    pub fn set_unix_time(&self, time: UnixTime) {
        let point = SyncPoint {
            unix_millis: time.as_millis(),
            at: Instant::now(),
        };
        SYNC_POINT.lock(|cell| cell.set(Some(point)));
    }
}

impl WallClock for ClockService {
    fn now(&self) -> WallTime {
        match SYNC_POINT.lock(Cell::get) {
            Some(point) => {
                let elapsed = Instant::now().saturating_duration_since(point.at);
                WallTime::from_unix_millis(
                    point.unix_millis + elapsed.as_millis(),
                    config::CLOCK.utc_offset_secs,
                )
            }
            None => WallTime::from_unix_millis(Instant::now().as_millis(), 0),
        }
    }
}
