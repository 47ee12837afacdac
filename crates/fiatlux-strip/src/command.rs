//! REST endpoints of the web UI.

use fiatlux_core::Query;
use heapless::String;

use crate::config::{clamp_channel, clamp_percent};

/// Longest decoded `/set` name accepted, the strip keeps its first 32 bytes
pub const NAME_INPUT_LEN: usize = 128;

/// Color, brightness and speed parameters shared by the mode endpoints.
///
/// Missing or unparsable parameters stay `None` and leave the setting as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Adjust {
    pub red: Option<u8>,
    pub green: Option<u8>,
    pub blue: Option<u8>,
    pub bright: Option<u8>,
    pub speed: Option<u8>,
}

impl Adjust {
    pub fn from_query(query: &Query<'_>) -> Self {
        Self {
            red: query.get_u32("red").map(clamp_channel),
            green: query.get_u32("green").map(clamp_channel),
            blue: query.get_u32("blue").map(clamp_channel),
            bright: query.get_u32("bright").map(clamp_percent),
            speed: query.get_u32("speed").map(clamp_percent),
        }
    }
}

/// Endpoints that change what a strip shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Adjust the current algorithm
    Led,
    Mono,
    Gradient,
    Rainbow,
    RainbowClock,
    Walk,
    Speed,
    Clock2,
}

/// `/set` form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub nr_leds: Option<u16>,
    pub counterclock: Option<bool>,
    pub led1: Option<u16>,
    /// Decoded name without control characters
    pub name: Option<String<NAME_INPUT_LEN>>,
}

impl Settings {
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_query(query: &Query<'_>) -> Self {
        let as_u16 = |v: u32| v.min(u32::from(u16::MAX)) as u16;
        Self {
            nr_leds: query.get_u32("nr_leds").map(as_u16),
            counterclock: query.get("rotate").and_then(|r| match r {
                "left" => Some(true),
                "right" => Some(false),
                _ => None,
            }),
            led1: query.get_u32("led1").map(as_u16),
            name: query
                .get_decoded::<NAME_INPUT_LEN>("name")
                .and_then(Result::ok)
                .map(|raw| raw.chars().filter(|c| !c.is_control()).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripCommand {
    Mode {
        mode: Mode,
        adjust: Adjust,
        /// Strip to select before applying
        strip: Option<usize>,
    },
    Power,
    Values {
        strip: Option<usize>,
    },
    Strips,
    Settings(Settings),
}

impl StripCommand {
    /// Map a request path and its query to a command.
    ///
    /// Returns `None` for paths that are not strip endpoints.
    pub fn parse(path: &str, query: &Query<'_>) -> Option<Self> {
        let mode = match path {
            "/led" => Mode::Led,
            "/mono" => Mode::Mono,
            "/gradient" => Mode::Gradient,
            "/rainbow" => Mode::Rainbow,
            "/rainbowclk" => Mode::RainbowClock,
            "/walk" => Mode::Walk,
            "/speed" => Mode::Speed,
            "/clock2" => Mode::Clock2,
            "/power" => return Some(Self::Power),
            "/values" => return Some(Self::Values { strip: strip_index(query) }),
            "/strips" => return Some(Self::Strips),
            "/set" => return Some(Self::Settings(Settings::from_query(query))),
            _ => return None,
        };

        Some(Self::Mode {
            mode,
            adjust: Adjust::from_query(query),
            strip: strip_index(query),
        })
    }

    /// Whether the command may change a strip
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Values { .. } | Self::Strips)
    }
}

fn strip_index(query: &Query<'_>) -> Option<usize> {
    query.get_u32("strip").and_then(|v| usize::try_from(v).ok())
}
