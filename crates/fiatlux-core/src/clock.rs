//! Local wall-clock time derived from unix time and a fixed UTC offset.

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Local time of day, the input of the clock animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallTime {
    /// Seconds since local midnight
    pub day_seconds: u32,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millis: u16,
}

impl WallTime {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn from_unix(secs: u64, millis: u16, utc_offset_secs: i32) -> Self {
        let local = secs as i64 + i64::from(utc_offset_secs);
        let day_seconds = local.rem_euclid(i64::from(SECONDS_PER_DAY)) as u32;

        Self {
            day_seconds,
            hour: (day_seconds / 3600) as u8,
            minute: (day_seconds / 60 % 60) as u8,
            second: (day_seconds % 60) as u8,
            millis: millis.min(999),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn from_unix_millis(millis: u64, utc_offset_secs: i32) -> Self {
        Self::from_unix(millis / 1000, (millis % 1000) as u16, utc_offset_secs)
    }

    /// Milliseconds elapsed in the current minute.
    pub fn minute_millis(&self) -> u32 {
        u32::from(self.second) * 1000 + u32::from(self.millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_time_is_split_into_fields() {
        // 2024-01-01T13:45:30Z
        let time = WallTime::from_unix(1_704_116_730, 250, 0);
        assert_eq!((time.hour, time.minute, time.second, time.millis), (13, 45, 30, 250));
        assert_eq!(time.day_seconds, 13 * 3600 + 45 * 60 + 30);
        assert_eq!(time.minute_millis(), 30_250);
    }

    #[test]
    fn positive_offset_wraps_past_midnight() {
        // 23:30 UTC + 1h = 00:30 local
        let time = WallTime::from_unix(1_704_151_800, 0, 3600);
        assert_eq!((time.hour, time.minute), (0, 30));
    }

    #[test]
    fn negative_offset_before_epoch_day_stays_in_range() {
        let time = WallTime::from_unix(60, 0, -3600);
        assert_eq!((time.hour, time.minute), (23, 1));
    }

    #[test]
    fn from_millis_keeps_sub_second_part() {
        let time = WallTime::from_unix_millis(61_999, 0);
        assert_eq!((time.minute, time.second, time.millis), (1, 1, 999));
    }
}
