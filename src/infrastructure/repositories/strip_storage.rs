use log::{debug, warn};

use fiatlux_core::storage::{PersistentStorage, StorageError};
use fiatlux_strip::persist::{self, PersistError};

use crate::{
    domain::{
        ports::{StripStorage, StripStorageError},
        types::AppStrip,
    },
    infrastructure::drivers::{EspFlashStorageDriver, SLOT_SIZE},
};

impl From<StorageError> for StripStorageError {
    fn from(e: StorageError) -> Self {
        match e {
            // Erased flash has no magic header
            StorageError::InvalidMagicHeader => StripStorageError::NotFound,
            StorageError::DriverError => StripStorageError::DriverError,
            StorageError::InvalidData => StripStorageError::InvalidRecord,
            StorageError::BufferTooSmall => StripStorageError::Encode,
        }
    }
}

impl From<PersistError> for StripStorageError {
    fn from(e: PersistError) -> Self {
        match e {
            PersistError::BufferTooSmall => StripStorageError::Encode,
            _ => StripStorageError::InvalidRecord,
        }
    }
}

/// Strip records, one flash slot per strip index
pub struct FlashStripStorage {
    storage: PersistentStorage<EspFlashStorageDriver, SLOT_SIZE>,
    buffer: [u8; SLOT_SIZE],
}

impl FlashStripStorage {
    pub fn new(driver: EspFlashStorageDriver) -> Self {
        Self {
            storage: PersistentStorage::new(driver),
            buffer: [0; SLOT_SIZE],
        }
    }
}

impl StripStorage for FlashStripStorage {
    fn load(&mut self, index: usize) -> Result<AppStrip, StripStorageError> {
        let payload = self.storage.load(index, &mut self.buffer)?;
        persist::decode(payload).map_err(|e| {
            warn!("persistence: strip {} record rejected: {:?}", index, e);
            StripStorageError::from(e)
        })
    }

    fn store(&mut self, index: usize, strip: &AppStrip) -> Result<(), StripStorageError> {
        let len = persist::encode(strip, &mut self.buffer)?;
        self.storage.save(index, &self.buffer[..len])?;
        debug!("persistence: strip {} stored ({} bytes)", index, len);
        Ok(())
    }
}
