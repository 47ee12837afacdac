//! Per-strip settings.

use core::fmt::Write as _;

use heapless::String;

use crate::{MAX_GRADIENTS, color::Rgb};

pub const NAME_LEN: usize = 32;

/// Upper bound of the brightness and speed percentages
pub const MAX_PERCENT: u8 = 100;

pub type StripName = String<NAME_LEN>;

/// Animation algorithm of a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Algorithm {
    #[default]
    Mono = 0,
    Rainbow = 1,
    RainbowClock = 2,
    Walk = 3,
    Clock2 = 4,
    Gradient = 5,
}

impl Algorithm {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Mono,
            1 => Self::Rainbow,
            2 => Self::RainbowClock,
            3 => Self::Walk,
            4 => Self::Clock2,
            5 => Self::Gradient,
            _ => return None,
        })
    }

    /// Whether the step period follows the speed setting
    pub const fn follows_speed(self) -> bool {
        matches!(self, Self::Rainbow | Self::Walk | Self::Gradient)
    }
}

/// Settings of one strip, everything that survives a power cycle
/// except the pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripConfig {
    pub algorithm: Algorithm,
    pub color1: Rgb,
    pub color2: Rgb,
    /// Brightness in percent (0-100)
    pub bright: u8,
    /// Animation speed (0-100), 0 freezes animated algorithms
    pub speed: u8,
    pub num_leds: u16,
    /// Physical LED showing logical LED 0
    pub led1: u16,
    pub counterclock: bool,
    /// Gradient stops laid out in the pixel buffer
    pub gradients: u8,
    pub power: bool,
    pub name: StripName,
}

impl StripConfig {
    pub fn new(num_leds: u16, name: StripName) -> Self {
        Self {
            algorithm: Algorithm::Mono,
            color1: Rgb { r: 255, g: 0, b: 0 },
            color2: Rgb { r: 0, g: 0, b: 255 },
            bright: MAX_PERCENT,
            speed: 0,
            num_leds: num_leds.max(1),
            led1: 0,
            counterclock: false,
            gradients: 1,
            power: true,
            name,
        }
    }

    /// Default config named after the data pin, e.g. `Strip GPIO25`.
    pub fn for_gpio(num_leds: u16, gpio: u8) -> Self {
        let mut name = StripName::new();
        let _ = write!(name, "Strip GPIO{}", gpio);
        Self::new(num_leds, name)
    }

    /// Bring every field back into its valid range.
    ///
    /// `max_leds` is the pixel buffer capacity.
    #[must_use]
    pub fn sanitized(mut self, max_leds: u16) -> Self {
        self.num_leds = self.num_leds.clamp(1, max_leds.max(1));
        self.led1 %= self.num_leds;
        self.bright = self.bright.min(MAX_PERCENT);
        self.speed = self.speed.min(MAX_PERCENT);
        #[allow(clippy::cast_possible_truncation)]
        let max_gradients = MAX_GRADIENTS as u8;
        self.gradients = self.gradients.clamp(1, max_gradients);
        self
    }

    /// `rotate` value shown to the UI
    pub const fn rotation(&self) -> &'static str {
        if self.counterclock { "left" } else { "right" }
    }
}

/// Clamp a request value to a color channel.
#[allow(clippy::cast_possible_truncation)]
pub fn clamp_channel(value: u32) -> u8 {
    value.min(u32::from(u8::MAX)) as u8
}

/// Clamp a request value to a percentage.
#[allow(clippy::cast_possible_truncation)]
pub fn clamp_percent(value: u32) -> u8 {
    value.min(u32::from(MAX_PERCENT)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpio_default_config() {
        let cfg = StripConfig::for_gpio(60, 25);
        assert_eq!(cfg.name.as_str(), "Strip GPIO25");
        assert_eq!(cfg.num_leds, 60);
        assert_eq!(cfg.bright, 100);
        assert_eq!(cfg.color1, Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(cfg.color2, Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(cfg.gradients, 1);
        assert!(cfg.power);
        assert_eq!(cfg.algorithm, Algorithm::Mono);
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let mut cfg = StripConfig::for_gpio(500, 4);
        cfg.led1 = 310;
        cfg.bright = 180;
        cfg.speed = 101;
        cfg.gradients = 0;

        let cfg = cfg.sanitized(300);
        assert_eq!(cfg.num_leds, 300);
        assert_eq!(cfg.led1, 10);
        assert_eq!(cfg.bright, 100);
        assert_eq!(cfg.speed, 100);
        assert_eq!(cfg.gradients, 1);
    }

    #[test]
    fn algorithm_ids_round_trip() {
        for id in 0..=5 {
            assert_eq!(Algorithm::from_u8(id).unwrap().as_u8(), id);
        }
        assert_eq!(Algorithm::from_u8(6), None);
    }

    #[test]
    fn request_values_are_clamped() {
        assert_eq!(clamp_channel(300), 255);
        assert_eq!(clamp_channel(7), 7);
        assert_eq!(clamp_percent(250), 100);
    }
}
