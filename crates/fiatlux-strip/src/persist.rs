//! Binary strip record.
//!
//! Layout: a fixed [`StripRecord`] header followed by `3 * num_leds` pixel
//! bytes in RGB order. The storage layer adds the magic header framing.

use bytemuck::{Pod, Zeroable};

use crate::{
    color::Rgb,
    config::{Algorithm, NAME_LEN, StripConfig, StripName},
    strip::{BYTES_PER_LED, Strip},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistError {
    /// Record shorter than its header or its pixel data
    Truncated,
    BufferTooSmall,
    UnknownAlgorithm,
    TooManyLeds,
    InvalidName,
}

#[derive(Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct StripRecord {
    algorithm: u8,
    power: u8,
    counterclock: u8,
    gradients: u8,
    bright: u8,
    speed: u8,
    color1: [u8; 3],
    color2: [u8; 3],
    num_leds: u16,
    led1: u16,
    name: [u8; NAME_LEN],
}

pub const RECORD_HEADER_SIZE: usize = size_of::<StripRecord>();

/// Bytes needed to store a strip of `num_leds` LEDs
pub const fn record_size(num_leds: usize) -> usize {
    RECORD_HEADER_SIZE + num_leds * BYTES_PER_LED
}

impl StripRecord {
    fn from_config(cfg: &StripConfig) -> Self {
        let mut name = [0u8; NAME_LEN];
        let bytes = cfg.name.as_bytes();
        name[..bytes.len()].copy_from_slice(bytes);

        Self {
            algorithm: cfg.algorithm.as_u8(),
            power: u8::from(cfg.power),
            counterclock: u8::from(cfg.counterclock),
            gradients: cfg.gradients,
            bright: cfg.bright,
            speed: cfg.speed,
            color1: [cfg.color1.r, cfg.color1.g, cfg.color1.b],
            color2: [cfg.color2.r, cfg.color2.g, cfg.color2.b],
            num_leds: cfg.num_leds,
            led1: cfg.led1,
            name,
        }
    }

    fn to_config(self) -> Result<StripConfig, PersistError> {
        let algorithm = Algorithm::from_u8(self.algorithm).ok_or(PersistError::UnknownAlgorithm)?;
        let name = parse_padded_name(&self.name)?;

        let mut cfg = StripConfig::new(self.num_leds, name);
        cfg.algorithm = algorithm;
        cfg.power = self.power != 0;
        cfg.counterclock = self.counterclock != 0;
        cfg.gradients = self.gradients;
        cfg.bright = self.bright;
        cfg.speed = self.speed;
        cfg.color1 = rgb(self.color1);
        cfg.color2 = rgb(self.color2);
        cfg.led1 = self.led1;
        Ok(cfg)
    }
}

/// Encode a strip into `out`, returning the record length.
pub fn encode<const N: usize>(strip: &Strip<N>, out: &mut [u8]) -> Result<usize, PersistError> {
    let pixels = strip.pixels();
    let len = record_size(pixels.len());
    if out.len() < len {
        return Err(PersistError::BufferTooSmall);
    }

    let record = StripRecord::from_config(strip.config());
    out[..RECORD_HEADER_SIZE].copy_from_slice(bytemuck::bytes_of(&record));
    for (chunk, px) in out[RECORD_HEADER_SIZE..len]
        .chunks_exact_mut(BYTES_PER_LED)
        .zip(pixels)
    {
        chunk.copy_from_slice(&[px.r, px.g, px.b]);
    }
    Ok(len)
}

/// Decode a strip record.
///
/// Records for more LEDs than the buffer capacity `N` are rejected.
pub fn decode<const N: usize>(data: &[u8]) -> Result<Strip<N>, PersistError> {
    let header = data.get(..RECORD_HEADER_SIZE).ok_or(PersistError::Truncated)?;
    let record: StripRecord = bytemuck::pod_read_unaligned(header);

    let num_leds = usize::from(record.num_leds);
    if num_leds > N {
        return Err(PersistError::TooManyLeds);
    }
    let pixel_bytes = data
        .get(RECORD_HEADER_SIZE..record_size(num_leds))
        .ok_or(PersistError::Truncated)?;

    let config = record.to_config()?;
    let mut pixels = [Rgb::default(); N];
    for (px, chunk) in pixels.iter_mut().zip(pixel_bytes.chunks_exact(BYTES_PER_LED)) {
        *px = rgb([chunk[0], chunk[1], chunk[2]]);
    }
    Ok(Strip::restore(config, &pixels[..num_leds]))
}

fn rgb([r, g, b]: [u8; 3]) -> Rgb {
    Rgb { r, g, b }
}

fn parse_padded_name(bytes: &[u8]) -> Result<StripName, PersistError> {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let name = core::str::from_utf8(&bytes[..end]).map_err(|_| PersistError::InvalidName)?;
    StripName::try_from(name).map_err(|()| PersistError::InvalidName)
}
