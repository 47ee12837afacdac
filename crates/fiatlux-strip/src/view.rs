//! JSON views served to the web UI.

use heapless::Vec;
use serde::Serialize;

use crate::{
    MAX_STRIPS,
    config::{StripConfig, StripName},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    BufferFull,
}

/// Settings of one strip as shown by the UI controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripValues {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub speed: u8,
    pub bright: u8,
    pub nr_leds: u16,
    pub led1: u16,
    pub rotate: &'static str,
    pub name: StripName,
}

impl From<&StripConfig> for StripValues {
    fn from(cfg: &StripConfig) -> Self {
        Self {
            red: cfg.color1.r,
            green: cfg.color1.g,
            blue: cfg.color1.b,
            speed: cfg.speed,
            bright: cfg.bright,
            nr_leds: cfg.num_leds,
            led1: cfg.led1,
            rotate: cfg.rotation(),
            name: cfg.name.clone(),
        }
    }
}

/// Names of all strips and the selected one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripList {
    pub nr_strips: usize,
    pub name: Vec<StripName, MAX_STRIPS>,
    pub selected_strip: usize,
}

/// Serialize a view into `buf`, returning the JSON length.
pub fn to_json<T: Serialize>(value: &T, buf: &mut [u8]) -> Result<usize, ViewError> {
    serde_json_core::to_slice(value, buf).map_err(|_| ViewError::BufferFull)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_json() {
        let mut cfg = StripConfig::for_gpio(60, 25);
        cfg.counterclock = true;
        cfg.led1 = 3;
        cfg.speed = 40;

        let mut buf = [0u8; 256];
        let len = to_json(&StripValues::from(&cfg), &mut buf).unwrap();
        assert_eq!(
            core::str::from_utf8(&buf[..len]).unwrap(),
            r#"{"red":255,"green":0,"blue":0,"speed":40,"bright":100,"nr_leds":60,"led1":3,"rotate":"left","name":"Strip GPIO25"}"#
        );
    }

    #[test]
    fn strip_list_json() {
        let mut list = StripList::default();
        list.name.push(StripName::try_from("Desk").unwrap()).unwrap();
        list.name.push(StripName::try_from("Shelf").unwrap()).unwrap();
        list.nr_strips = 2;
        list.selected_strip = 1;

        let mut buf = [0u8; 128];
        let len = to_json(&list, &mut buf).unwrap();
        assert_eq!(
            core::str::from_utf8(&buf[..len]).unwrap(),
            r#"{"nr_strips":2,"name":["Desk","Shelf"],"selected_strip":1}"#
        );
    }

    #[test]
    fn small_buffer_is_reported() {
        let cfg = StripConfig::for_gpio(60, 25);
        let mut buf = [0u8; 16];
        assert_eq!(to_json(&StripValues::from(&cfg), &mut buf), Err(ViewError::BufferFull));
    }
}
