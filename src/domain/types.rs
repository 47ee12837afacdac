use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use fiatlux_strip::{Strip, StripSet};

use super::ports::StripControlPort;
use crate::config::{MAX_LEDS, STRIP_COUNT};

pub type AppStrip = Strip<MAX_LEDS>;

pub type AppStrips = StripSet<STRIP_COUNT, MAX_LEDS>;

/// Strip set shared by the HTTP controller, the renderer and the persistence task
pub type SharedStrips = Mutex<CriticalSectionRawMutex, RefCell<AppStrips>>;

// Type alias for the strip usecases port reference
pub type StripControlPortRef = &'static dyn StripControlPort;
