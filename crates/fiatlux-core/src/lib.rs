#![no_std]

//! Hardware-independent building blocks of the controller firmware.
//!
//! - `http` - request line parsing and response header formatting
//! - `query` - URL query string access
//! - `sntp` - SNTP client packet codec
//! - `clock` - unix time to local wall-clock conversion
//! - `storage` - magic-header framing over a slot-based storage driver

pub mod clock;
pub mod http;
pub mod query;
pub mod sntp;
pub mod storage;

pub use clock::WallTime;
pub use query::Query;
