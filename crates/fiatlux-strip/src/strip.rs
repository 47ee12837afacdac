use heapless::Vec;
use log::{debug, warn};

use fiatlux_core::WallTime;

use crate::{
    MAX_GRADIENTS, algorithm,
    color::{BLACK, Rgb},
    config::{Algorithm, MAX_PERCENT, NAME_LEN, StripConfig},
};

/// Bytes per LED on the wire
pub const BYTES_PER_LED: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripError {
    /// Two gradient stops would land on the same LED
    NotEnoughLeds,
}

/// One LED strip: settings, logical pixel buffer and rotation offset.
///
/// `N` is the pixel buffer capacity, only the first `num_leds` pixels are used.
#[derive(Debug, Clone)]
pub struct Strip<const N: usize> {
    config: StripConfig,
    pixels: [Rgb; N],
    start_led: u16,
}

impl<const N: usize> Strip<N> {
    /// Buffer capacity as an LED count
    pub const CAPACITY: u16 = if N > u16::MAX as usize { u16::MAX } else { N as u16 };

    pub fn new(config: StripConfig) -> Self {
        let config = config.sanitized(Self::CAPACITY);
        Self {
            start_led: config.led1,
            config,
            pixels: [BLACK; N],
        }
    }

    /// Rebuild a strip from stored settings and pixel colors.
    pub fn restore(config: StripConfig, stored: &[Rgb]) -> Self {
        let mut strip = Self::new(config);
        let len = stored.len().min(strip.num_leds());
        strip.pixels[..len].copy_from_slice(&stored[..len]);
        strip
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Logical pixels in use
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.num_leds()]
    }

    pub fn start_led(&self) -> u16 {
        self.start_led
    }

    pub fn num_leds(&self) -> usize {
        usize::from(self.config.num_leds)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    pub fn is_on(&self) -> bool {
        self.config.power
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Update the primary color channel by channel, `None` keeps a channel.
    pub fn set_channels(&mut self, red: Option<u8>, green: Option<u8>, blue: Option<u8>) {
        let color = &mut self.config.color1;
        if let Some(r) = red {
            color.r = r;
        }
        if let Some(g) = green {
            color.g = g;
        }
        if let Some(b) = blue {
            color.b = b;
        }
    }

    pub fn set_bright(&mut self, bright: u8) {
        self.config.bright = bright.min(MAX_PERCENT);
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.config.speed = speed.min(MAX_PERCENT);
    }

    pub fn dark(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// Light pixel 0 and start a new gradient from it.
    pub fn first_led(&mut self, color: Rgb) {
        self.pixels[0] = color;
        self.config.gradients = 1;
    }

    /// Add a gradient stop in `color`.
    ///
    /// The existing stops are laid out evenly again with the new one last.
    /// Once [`MAX_GRADIENTS`] stops exist the oldest one is dropped.
    pub fn add_gradient(&mut self, color: Rgb) -> Result<(), StripError> {
        let n = self.num_leds();
        let count = usize::from(self.config.gradients).clamp(1, MAX_GRADIENTS);

        let mut stops: Vec<Rgb, MAX_GRADIENTS> = Vec::new();
        for g in 0..count {
            let _ = stops.push(self.pixels[algorithm::gradient_stop(n, g, count)]);
        }
        if stops.is_full() {
            stops.remove(0);
        }
        let _ = stops.push(color);

        let new_count = stops.len();
        if n < new_count {
            warn!("strip: {} LEDs cannot hold {} gradient stops", n, new_count);
            return Err(StripError::NotEnoughLeds);
        }

        for (g, stop) in stops.iter().enumerate() {
            self.pixels[algorithm::gradient_stop(n, g, new_count)] = *stop;
        }
        #[allow(clippy::cast_possible_truncation)]
        let new_count = new_count as u8;
        self.config.gradients = new_count;
        debug!("strip: gradient has {} stops", new_count);
        Ok(())
    }

    pub fn set_num_leds(&mut self, num_leds: u16) {
        let num_leds = num_leds.clamp(1, Self::CAPACITY.max(1));
        self.config.num_leds = num_leds;
        self.config.led1 %= num_leds;
        self.start_led %= num_leds;
    }

    pub fn set_led1(&mut self, led1: u16) {
        self.config.led1 = led1 % self.config.num_leds;
        self.start_led = self.config.led1;
    }

    pub fn set_counterclock(&mut self, counterclock: bool) {
        self.config.counterclock = counterclock;
    }

    /// Rename the strip, cutting the name at a char boundary when it is too long.
    pub fn set_name(&mut self, name: &str) {
        let mut end = name.len().min(NAME_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        self.config.name.clear();
        let _ = self.config.name.push_str(&name[..end]);
    }

    /// Returns the new power state.
    pub fn toggle_power(&mut self) -> bool {
        self.config.power = !self.config.power;
        self.config.power
    }

    pub fn switch_on(&mut self) {
        self.config.power = true;
    }

    /// Advance one animation step.
    pub fn render(&mut self, now: &WallTime) {
        let n = self.num_leds();
        let cfg = &self.config;
        let pixels = &mut self.pixels[..n];
        let animated = cfg.speed > 0;

        match cfg.algorithm {
            Algorithm::Mono => algorithm::mono(pixels, cfg.color1),
            Algorithm::Rainbow => algorithm::rainbow(pixels, cfg.bright),
            Algorithm::RainbowClock => algorithm::rainbow_clock(pixels, now, cfg.bright),
            Algorithm::Walk if animated => algorithm::walk(pixels),
            Algorithm::Walk => {}
            Algorithm::Clock2 => algorithm::clock2(pixels, now, cfg.color1, cfg.color2),
            Algorithm::Gradient => algorithm::gradient(pixels, cfg.gradients),
        }

        match self.config.algorithm {
            Algorithm::Rainbow | Algorithm::Gradient if animated => {
                self.start_led = (self.start_led + 1) % self.config.num_leds;
            }
            Algorithm::Clock2 => self.start_led = self.config.led1,
            _ => {}
        }
    }

    /// Write the wire frame (GRB per LED) into `out`.
    ///
    /// Applies direction and rotation. A powered-off strip writes zeros.
    /// Returns the number of bytes written.
    pub fn write_frame(&self, out: &mut [u8]) -> usize {
        let n = self.num_leds();
        let len = n * BYTES_PER_LED;
        if out.len() < len {
            warn!("strip: frame buffer too small for {} LEDs", n);
            return 0;
        }
        let frame = &mut out[..len];
        if !self.config.power {
            frame.fill(0);
            return len;
        }

        let start = usize::from(self.start_led);
        for i in 0..n {
            let j = if self.config.counterclock { n - 1 - i } else { i };
            let k = (i + start) % n;
            let color = self.pixels[j];
            frame[k * BYTES_PER_LED..(k + 1) * BYTES_PER_LED]
                .copy_from_slice(&[color.g, color.r, color.b]);
        }
        len
    }

    /// Milliseconds until the next step, `None` while the strip is off.
    pub fn period_ms(&self) -> Option<u32> {
        algorithm::period_ms(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    fn strip(num_leds: u16) -> Strip<32> {
        Strip::new(StripConfig::for_gpio(num_leds, 25))
    }

    #[test]
    fn new_strip_is_clamped_to_capacity() {
        let strip = strip(100);
        assert_eq!(strip.num_leds(), 32);
        assert_eq!(strip.pixels().len(), 32);
    }

    #[test]
    fn gradient_stops_are_relaid_evenly() {
        let mut strip = strip(12);
        strip.first_led(RED);
        strip.add_gradient(GREEN).unwrap();
        assert_eq!(strip.pixels()[0], RED);
        assert_eq!(strip.pixels()[6], GREEN);

        strip.add_gradient(BLUE).unwrap();
        assert_eq!(strip.config().gradients, 3);
        assert_eq!(strip.pixels()[0], RED);
        assert_eq!(strip.pixels()[4], GREEN);
        assert_eq!(strip.pixels()[8], BLUE);
    }

    #[test]
    fn gradient_on_too_short_strip_is_rejected() {
        let mut strip = strip(2);
        strip.first_led(RED);
        strip.add_gradient(GREEN).unwrap();
        let before = strip.clone();

        assert_eq!(strip.add_gradient(BLUE), Err(StripError::NotEnoughLeds));
        assert_eq!(strip.pixels(), before.pixels());
        assert_eq!(strip.config().gradients, 2);
    }

    #[test]
    fn oldest_gradient_stop_is_dropped_when_full() {
        let mut strip = strip(32);
        strip.first_led(Rgb { r: 1, g: 0, b: 0 });
        for i in 2..=MAX_GRADIENTS as u8 {
            strip.add_gradient(Rgb { r: i, g: 0, b: 0 }).unwrap();
        }
        assert_eq!(strip.config().gradients as usize, MAX_GRADIENTS);

        strip.add_gradient(BLUE).unwrap();
        assert_eq!(strip.config().gradients as usize, MAX_GRADIENTS);
        assert_eq!(strip.pixels()[0], Rgb { r: 2, g: 0, b: 0 });
        assert_eq!(strip.pixels()[30], BLUE);
    }

    #[test]
    fn frame_is_grb() {
        let mut strip = strip(2);
        strip.render(&WallTime::default());

        let mut out = [0xAA; 8];
        assert_eq!(strip.write_frame(&mut out), 6);
        assert_eq!(out, [0, 255, 0, 0, 255, 0, 0xAA, 0xAA]);
    }

    #[test]
    fn brightness_leaves_picked_colors_alone() {
        let mut strip = strip(2);
        strip.set_bright(50);
        strip.render(&WallTime::default());

        let mut out = [0; 6];
        strip.write_frame(&mut out);
        assert_eq!(out, [0, 255, 0, 0, 255, 0]);

        strip.set_algorithm(Algorithm::Rainbow);
        strip.render(&WallTime::default());
        strip.write_frame(&mut out);
        assert_eq!(&out[..3], &[0, 127, 0]);
    }

    #[test]
    fn rainbow_clock_fills_every_pixel() {
        let mut strip = strip(4);
        strip.set_algorithm(Algorithm::RainbowClock);
        let noon = WallTime {
            day_seconds: 12 * 3600,
            hour: 12,
            ..WallTime::default()
        };
        strip.render(&noon);

        let hue = algorithm::day_hue(&noon);
        let expected = crate::color::hsv_to_rgb(hue, 100, 100);
        assert!(strip.pixels().iter().all(|p| *p == expected));
        assert_eq!(strip.start_led(), 0);
    }

    #[test]
    fn frame_applies_rotation_and_direction() {
        let mut strip = strip(3);
        strip.dark();
        strip.first_led(RED);
        strip.set_algorithm(Algorithm::Walk);

        let mut out = [0; 9];
        strip.set_led1(1);
        strip.write_frame(&mut out);
        assert_eq!(out, [0, 0, 0, 0, 255, 0, 0, 0, 0]);

        strip.set_counterclock(true);
        strip.write_frame(&mut out);
        assert_eq!(out, [0, 255, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn powered_off_strip_writes_zeros() {
        let mut strip = strip(4);
        strip.render(&WallTime::default());
        assert!(!strip.toggle_power());

        let mut out = [0xFF; 12];
        assert_eq!(strip.write_frame(&mut out), 12);
        assert_eq!(out, [0; 12]);
        assert_eq!(strip.period_ms(), None);
    }

    #[test]
    fn rainbow_rotates_only_with_speed() {
        let mut strip = strip(10);
        strip.set_algorithm(Algorithm::Rainbow);
        strip.render(&WallTime::default());
        assert_eq!(strip.start_led(), 0);

        strip.set_speed(10);
        strip.render(&WallTime::default());
        strip.render(&WallTime::default());
        assert_eq!(strip.start_led(), 2);
    }

    #[test]
    fn gradient_rotates_only_with_speed() {
        let mut strip = strip(10);
        strip.first_led(RED);
        strip.add_gradient(BLUE).unwrap();
        strip.set_algorithm(Algorithm::Gradient);
        strip.render(&WallTime::default());
        assert_eq!(strip.start_led(), 0);

        strip.set_speed(30);
        for _ in 0..3 {
            strip.render(&WallTime::default());
        }
        assert_eq!(strip.start_led(), 3);
        assert_eq!(strip.pixels()[0], RED);
        assert_eq!(strip.pixels()[5], BLUE);

        // wraps after a full turn
        for _ in 0..7 {
            strip.render(&WallTime::default());
        }
        assert_eq!(strip.start_led(), 0);
    }

    #[test]
    fn walk_keeps_pixels_without_speed() {
        let mut strip = strip(4);
        strip.dark();
        strip.first_led(RED);
        strip.set_algorithm(Algorithm::Walk);

        strip.render(&WallTime::default());
        assert_eq!(strip.pixels()[0], RED);

        strip.set_speed(1);
        strip.render(&WallTime::default());
        assert_eq!(strip.pixels()[1], RED);
        assert_eq!(strip.pixels()[0], BLACK);
    }

    #[test]
    fn clock_resets_rotation_to_first_led() {
        let mut strip = strip(10);
        strip.set_led1(3);
        strip.set_algorithm(Algorithm::Rainbow);
        strip.set_speed(50);
        strip.render(&WallTime::default());
        assert_eq!(strip.start_led(), 4);

        strip.set_algorithm(Algorithm::Clock2);
        strip.render(&WallTime::default());
        assert_eq!(strip.start_led(), 3);
    }

    #[test]
    fn shrinking_keeps_first_led_in_range() {
        let mut strip = strip(20);
        strip.set_led1(15);
        strip.set_num_leds(10);
        assert_eq!(strip.config().led1, 5);
        assert!(strip.start_led() < 10);
    }

    #[test]
    fn long_names_are_cut_at_char_boundary() {
        let mut strip = strip(4);
        let name = "äääääääääääääääää"; // 17 two-byte chars
        strip.set_name(name);
        assert_eq!(strip.config().name.len(), 32);

        strip.set_name("Kitchen");
        assert_eq!(strip.config().name.as_str(), "Kitchen");
    }
}
