//! Animation steps.
//!
//! Every step draws into the logical pixel buffer. Only the rainbow
//! algorithms dim by `bright`, the others show their colors as picked.
//! Rotation and direction are applied when the frame is written out, see
//! [`Strip::write_frame`](crate::Strip::write_frame).

use fiatlux_core::WallTime;
use fiatlux_core::clock::SECONDS_PER_DAY;

use crate::{
    color::{Rgb, hsv_to_rgb, lerp_color, scale_percent},
    config::{Algorithm, MAX_PERCENT, StripConfig},
};

/// Lower bound of every step period
pub const MIN_PERIOD_MS: u32 = 10;

/// Step period of non-animated algorithms
pub const IDLE_PERIOD_MS: u32 = 1000;

/// Value (percent) of the minute fill drawn by the clock
const CLOCK_FILL_VALUE: u8 = 5;

/// Strips shorter than this get no hour marks
const CLOCK_MARKS_MIN_LEDS: usize = 60;

/// Delay until the next step, `None` while the strip is off.
pub fn period_ms(cfg: &StripConfig) -> Option<u32> {
    if !cfg.power {
        return None;
    }
    let period = match cfg.algorithm {
        alg if alg.follows_speed() => {
            let slowness = u32::from(MAX_PERCENT - cfg.speed.min(MAX_PERCENT));
            slowness * slowness
        }
        Algorithm::Clock2 => IDLE_PERIOD_MS / u32::from(cfg.num_leds.max(1)),
        _ => IDLE_PERIOD_MS,
    };
    Some(period.max(MIN_PERIOD_MS))
}

/// Fill every pixel with one color.
pub fn mono(pixels: &mut [Rgb], color: Rgb) {
    pixels.fill(color);
}

/// Spread the full hue circle once over the strip, dimmed to `bright` percent.
#[allow(clippy::cast_possible_truncation)]
pub fn rainbow(pixels: &mut [Rgb], bright: u8) {
    let n = pixels.len().max(1);
    for (j, px) in pixels.iter_mut().enumerate() {
        *px = scale_percent(hsv_to_rgb((j * 360 / n) as u16, 100, 100), bright);
    }
}

/// Hue of the time of day, walking backwards once around the circle per day.
#[allow(clippy::cast_possible_truncation)]
pub fn day_hue(now: &WallTime) -> u16 {
    let degrees = u64::from(now.day_seconds) * 360 / u64::from(SECONDS_PER_DAY);
    359 - (degrees % 360) as u16
}

/// Whole strip in the hue of the time of day, `bright` is the HSV value.
pub fn rainbow_clock(pixels: &mut [Rgb], now: &WallTime, bright: u8) {
    pixels.fill(hsv_to_rgb(day_hue(now), 100, bright));
}

/// Move the pattern one pixel forward, the last pixel wraps to the front.
pub fn walk(pixels: &mut [Rgb]) {
    if pixels.len() > 1 {
        pixels.rotate_right(1);
    }
}

/// Analog clock: dim minute fill, hour marks, hour and second hands.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn clock2(pixels: &mut [Rgb], now: &WallTime, color1: Rgb, color2: Rgb) {
    let n = pixels.len();
    if n == 0 {
        return;
    }
    let hue = day_hue(now);
    let minute = usize::from(now.minute);
    let hour = usize::from(now.hour % 12);

    pixels.fill(Rgb::default());
    let filled = n * minute / 60;
    pixels[..filled].fill(hsv_to_rgb(hue, 100, CLOCK_FILL_VALUE));

    if n >= CLOCK_MARKS_MIN_LEDS {
        for mark in 0..12 {
            let width = match mark {
                0 => 2,
                3 | 6 | 9 => 1,
                _ => 0,
            };
            let center = (n * mark / 12) as i32;
            for d in -width..=width {
                pixels[wrap(center + d, n)] = color2;
            }
        }
    }

    let hour_hand = (n * (hour * 60 + minute) / 720) as i32;
    let hand_color = hsv_to_rgb(hue + 180, 100, 100);
    for d in -1..=1 {
        pixels[wrap(hour_hand + d, n)] = hand_color;
    }

    let second_hand = n * now.minute_millis() as usize / 60_000;
    pixels[second_hand % n] = color1;
}

/// Position of gradient stop `g` out of `count` on a strip of `n` pixels.
pub const fn gradient_stop(n: usize, g: usize, count: usize) -> usize {
    if count == 0 { 0 } else { n * g / count }
}

/// Interpolate linearly between the stops laid out in the buffer.
///
/// With fewer than two stops the middle pixel acts as the second stop.
/// The last segment wraps around to pixel 0.
pub fn gradient(pixels: &mut [Rgb], stops: u8) {
    let n = pixels.len();
    let count = usize::from(stops.max(2));
    if n < 2 {
        return;
    }
    for g in 0..count {
        let a = gradient_stop(n, g, count);
        let b = gradient_stop(n, g + 1, count);
        let from = pixels[a % n];
        let to = pixels[b % n];
        for i in (a + 1)..b.min(n) {
            pixels[i] = lerp_color(from, to, a, b, i);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn wrap(index: i32, n: usize) -> usize {
    index.rem_euclid(n as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    fn at(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime {
            day_seconds: u32::from(hour) * 3600 + u32::from(minute) * 60 + u32::from(second),
            hour,
            minute,
            second,
            millis: 0,
        }
    }

    fn cfg(algorithm: Algorithm, speed: u8) -> StripConfig {
        let mut cfg = StripConfig::for_gpio(60, 25);
        cfg.algorithm = algorithm;
        cfg.speed = speed;
        cfg
    }

    #[test]
    fn speed_periods() {
        assert_eq!(period_ms(&cfg(Algorithm::Rainbow, 0)), Some(10_000));
        assert_eq!(period_ms(&cfg(Algorithm::Walk, 90)), Some(100));
        assert_eq!(period_ms(&cfg(Algorithm::Gradient, 100)), Some(MIN_PERIOD_MS));
        assert_eq!(period_ms(&cfg(Algorithm::Mono, 50)), Some(1000));
        assert_eq!(period_ms(&cfg(Algorithm::Clock2, 0)), Some(16));
    }

    #[test]
    fn powered_off_strip_has_no_period() {
        let mut cfg = cfg(Algorithm::Rainbow, 50);
        cfg.power = false;
        assert_eq!(period_ms(&cfg), None);
    }

    #[test]
    fn rainbow_spreads_hues() {
        let mut px = [BLACK; 6];
        rainbow(&mut px, 100);
        assert_eq!(px[0], RED);
        assert_eq!(px[2], Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(px[4], BLUE);

        rainbow(&mut px, 50);
        assert_eq!(px[0], Rgb { r: 127, g: 0, b: 0 });
    }

    #[test]
    fn rainbow_clock_fills_with_day_hue() {
        let now = at(12, 0, 0);
        let mut px = [BLACK; 5];
        rainbow_clock(&mut px, &now, 100);
        assert!(px.iter().all(|p| *p == hsv_to_rgb(179, 100, 100)));

        rainbow_clock(&mut px, &now, 20);
        assert!(px.iter().all(|p| *p == hsv_to_rgb(179, 100, 20)));
    }

    #[test]
    fn day_hue_walks_backwards() {
        assert_eq!(day_hue(&at(0, 0, 0)), 359);
        assert_eq!(day_hue(&at(12, 0, 0)), 179);
        assert_eq!(day_hue(&at(23, 59, 59)), 0);
    }

    #[test]
    fn walk_rotates_one_pixel() {
        let mut px = [RED, BLACK, BLACK, BLUE];
        walk(&mut px);
        assert_eq!(px, [BLUE, RED, BLACK, BLACK]);
    }

    #[test]
    fn gradient_between_two_stops() {
        let mut px = [BLACK; 10];
        px[0] = Rgb { r: 100, g: 0, b: 0 };
        px[5] = Rgb { r: 0, g: 0, b: 100 };
        gradient(&mut px, 2);

        assert_eq!(px[0], Rgb { r: 100, g: 0, b: 0 });
        assert_eq!(px[1], Rgb { r: 80, g: 0, b: 20 });
        assert_eq!(px[5], Rgb { r: 0, g: 0, b: 100 });
        // last segment wraps back to pixel 0
        assert_eq!(px[9], Rgb { r: 80, g: 0, b: 20 });
    }

    #[test]
    fn clock_at_quarter_past_three() {
        let mut px = [BLACK; 60];
        clock2(&mut px, &at(3, 15, 30), RED, BLUE);

        // minute fill, dim
        assert_ne!(px[7], BLACK);
        assert!(px[7].r <= 12 && px[7].g <= 12 && px[7].b <= 12);
        // hour marks
        assert_eq!(px[59], BLUE);
        assert_eq!(px[58], BLUE);
        assert_eq!(px[2], BLUE);
        assert_eq!(px[5], BLUE);
        assert_eq!(px[29], BLUE);
        assert_eq!(px[31], BLUE);
        assert_eq!(px[22], BLACK);
        // hour hand around 60 * 195 / 720 = 16
        let hand = hsv_to_rgb(day_hue(&at(3, 15, 30)) + 180, 100, 100);
        assert_eq!(px[16], hand);
        assert_eq!(px[17], hand);
        // second hand at 30s
        assert_eq!(px[30], RED);
    }

    #[test]
    fn second_hand_follows_millis() {
        let mut now = at(0, 0, 1);
        let mut px = [BLACK; 120];
        clock2(&mut px, &now, RED, BLUE);
        // 120 * 1000 / 60000
        assert_eq!(px[2], RED);
        assert_ne!(px[3], RED);

        now.millis = 500;
        clock2(&mut px, &now, RED, BLUE);
        // 120 * 1500 / 60000
        assert_eq!(px[3], RED);
        assert_ne!(px[2], RED);
    }

    #[test]
    fn short_clock_has_no_marks() {
        let mut px = [BLACK; 12];
        clock2(&mut px, &at(0, 0, 0), RED, BLUE);
        assert!(!px.contains(&BLUE));
        assert_eq!(px[0], RED);
    }
}
