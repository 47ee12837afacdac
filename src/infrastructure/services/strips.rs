use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use fiatlux_strip::StripSet;

use crate::domain::types::SharedStrips;

/// Strips of this controller, filled by the boot controller
pub static STRIPS: SharedStrips = Mutex::new(RefCell::new(StripSet::new()));
