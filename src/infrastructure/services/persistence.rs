use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use log::warn;

use crate::domain::ports::StripPersistencePort;

const PERSISTENCE_CHANNEL_SIZE: usize = 8;

/// Type alias for the strip index receiver
pub type StripIndexReceiver =
    Receiver<'static, CriticalSectionRawMutex, usize, PERSISTENCE_CHANNEL_SIZE>;

/// Indices of strips whose record is out of date
static PERSISTENCE_CHANNEL: Channel<CriticalSectionRawMutex, usize, PERSISTENCE_CHANNEL_SIZE> =
    Channel::new();

#[derive(Debug, Default, Clone, Copy)]
pub struct StripPersistenceService;

impl StripPersistencePort for StripPersistenceService {
    fn request_persist(&self, index: usize) {
        if PERSISTENCE_CHANNEL.try_send(index).is_err() {
            warn!("persistence: queue full, strip {} dropped", index);
        }
    }
}

pub fn get_persistence_receiver() -> StripIndexReceiver {
    PERSISTENCE_CHANNEL.receiver()
}
