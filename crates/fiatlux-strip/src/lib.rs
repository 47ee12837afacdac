#![no_std]

//! LED strip engine
//!
//! Architecture layers:
//! - `config` - per-strip settings and the [`Algorithm`] selector
//! - `color` - integer color math (HSV, percent scaling, interpolation)
//! - `algorithm` - one animation step per algorithm, scheduling periods
//! - `strip` - [`Strip`] state: config, pixel buffer, output mapping
//! - `set` - [`StripSet`], the strips of one controller and the selected one
//! - `command` - REST endpoint parsing into [`StripCommand`]
//! - `view` - JSON views returned to the web UI
//! - `persist` - binary record stored per strip
//!
//! The engine never touches hardware: the firmware feeds it wall-clock time,
//! pushes the produced frames to the LED driver, and stores the records.

pub mod algorithm;
pub mod color;
pub mod command;
pub mod config;
pub mod persist;
pub mod set;
pub mod strip;
pub mod view;

pub use color::Rgb;
pub use command::{Mode, StripCommand};
pub use config::{Algorithm, StripConfig, StripName};
pub use set::{Outcome, Reply, StripSet};
pub use strip::{Strip, StripError};
pub use view::{StripList, StripValues};

/// Maximum number of gradient stops kept in the pixel buffer
pub const MAX_GRADIENTS: usize = 16;

/// Maximum number of strips one controller drives
pub const MAX_STRIPS: usize = 8;
