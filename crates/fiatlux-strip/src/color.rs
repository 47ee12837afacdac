use smart_leds::RGB8;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Convert HSV to RGB with integer math.
///
/// * `hue` - degrees, wraps at 360
/// * `sat` - saturation in percent (0-100)
/// * `val` - value in percent (0-100)
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_to_rgb(hue: u16, sat: u8, val: u8) -> Rgb {
    let hue = u32::from(hue % 360);
    let sat = u32::from(sat.min(100));
    let rgb_max = u32::from(val.min(100)) * 255 / 100;
    let rgb_min = rgb_max * (100 - sat) / 100;

    let sector = hue / 60;
    let diff = hue % 60;
    // RGB adjustment amount by hue
    let rgb_adj = (rgb_max - rgb_min) * diff / 60;

    let (r, g, b) = match sector {
        0 => (rgb_max, rgb_min + rgb_adj, rgb_min),
        1 => (rgb_max - rgb_adj, rgb_max, rgb_min),
        2 => (rgb_min, rgb_max, rgb_min + rgb_adj),
        3 => (rgb_min, rgb_max - rgb_adj, rgb_max),
        4 => (rgb_min + rgb_adj, rgb_min, rgb_max),
        _ => (rgb_max, rgb_min, rgb_max - rgb_adj),
    };

    Rgb {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}

/// Scale a color by a percentage (0-100).
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn scale_percent(color: Rgb, percent: u8) -> Rgb {
    let percent = u16::from(percent.min(100));
    let scale = |c: u8| (u16::from(c) * percent / 100) as u8;
    Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

/// Channel value at position `i` of a linear ramp from `from` at `a` to `to` at `b`.
///
/// The distance is measured from the `to` end, so rounding pulls toward `to`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn lerp_channel(from: u8, to: u8, a: usize, b: usize, i: usize) -> u8 {
    if b <= a {
        return from;
    }
    let span = (b - a) as i32;
    let remaining = (b - i.clamp(a, b)) as i32;
    let from = i32::from(from);
    let to = i32::from(to);

    (to + (from - to) * remaining / span) as u8
}

/// Blend two colors along a ramp, see [`lerp_channel`].
pub fn lerp_color(from: Rgb, to: Rgb, a: usize, b: usize, i: usize) -> Rgb {
    Rgb {
        r: lerp_channel(from.r, to.r, a, b, i),
        g: lerp_channel(from.g, to.g, a, b, i),
        b: lerp_channel(from.b, to.b, a, b, i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0, 100, 100), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(120, 100, 100), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240, 100, 100), Rgb { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn hue_wraps_at_360() {
        assert_eq!(hsv_to_rgb(360, 100, 100), hsv_to_rgb(0, 100, 100));
        assert_eq!(hsv_to_rgb(539, 100, 100), hsv_to_rgb(179, 100, 100));
    }

    #[test]
    fn mixed_hue_adjusts_second_channel() {
        // 30 degrees is halfway from red to yellow
        assert_eq!(hsv_to_rgb(30, 100, 100), Rgb { r: 255, g: 127, b: 0 });
    }

    #[test]
    fn zero_saturation_is_grey() {
        let grey = hsv_to_rgb(200, 0, 50);
        assert_eq!(grey, Rgb { r: 127, g: 127, b: 127 });
    }

    #[test]
    fn dim_value_stays_dim() {
        assert_eq!(hsv_to_rgb(0, 100, 5), Rgb { r: 12, g: 0, b: 0 });
    }

    #[test]
    fn percent_scaling() {
        let c = Rgb { r: 200, g: 100, b: 255 };
        assert_eq!(scale_percent(c, 100), c);
        assert_eq!(scale_percent(c, 50), Rgb { r: 100, g: 50, b: 127 });
        assert_eq!(scale_percent(c, 0), BLACK);
    }

    #[test]
    fn ramp_hits_both_ends() {
        assert_eq!(lerp_channel(0, 100, 10, 20, 10), 0);
        assert_eq!(lerp_channel(0, 100, 10, 20, 15), 50);
        assert_eq!(lerp_channel(0, 100, 10, 20, 20), 100);
        assert_eq!(lerp_channel(200, 100, 0, 4, 1), 175);
    }

    #[test]
    fn ramp_rounds_toward_target() {
        assert_eq!(lerp_channel(100, 0, 0, 7, 3), 57);
        assert_eq!(lerp_channel(0, 100, 0, 7, 3), 43);
    }
}
