use fiatlux_core::WallTime;
use fiatlux_strip::{Outcome, StripCommand};

use crate::domain::types::AppStrip;

#[derive(Debug)]
pub enum StripStorageError {
    /// Flash could not be read or written
    DriverError,
    /// Nothing stored for the strip
    NotFound,
    /// A record exists but does not decode
    InvalidRecord,
    /// The strip does not fit a storage slot
    Encode,
}

/// Port interface for the strip usecases
pub trait StripControlPort: Sync + Send {
    /// Execute a web UI command on the strip set
    fn execute(&self, command: StripCommand) -> Outcome;

    /// Add a strip restored at boot
    fn restore(&self, strip: AppStrip);
}

/// Wakes the renderer so a change shows up at once
pub trait StripRenderPort {
    fn wake(&self, index: usize);
}

/// Queues a strip snapshot for writing to flash
pub trait StripPersistencePort {
    fn request_persist(&self, index: usize);
}

/// Per-strip record storage
pub trait StripStorage {
    fn load(&mut self, index: usize) -> Result<AppStrip, StripStorageError>;
    fn store(&mut self, index: usize, strip: &AppStrip) -> Result<(), StripStorageError>;
}

/// Output of rendered frames
pub trait LedOutputPort {
    /// Push a GRB wire frame to a strip
    fn write_frame(&mut self, index: usize, frame: &[u8]);
}

/// Local time of day for the clock algorithms
pub trait WallClock {
    fn now(&self) -> WallTime;
}

pub trait OnBootHandler {
    fn on_boot<S: StripStorage>(&self, storage: &mut S);
}
