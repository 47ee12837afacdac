//! Flash storage driver used by the strip records.
//!
//! Every strip owns one erase block of the `strips` partition.

use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use esp_storage::FlashStorage;
use log::warn;

use fiatlux_core::storage::{StorageDriver, StorageError};
use fiatlux_strip::persist::record_size;

use crate::config::{self, MAX_LEDS};

const BLOCK_SIZE: u32 = 4096;

/// Bytes read and written per strip record
pub const SLOT_SIZE: usize = 1024;

const _: () = assert!(record_size(MAX_LEDS) + 2 <= SLOT_SIZE);
const _: () = assert!(SLOT_SIZE <= BLOCK_SIZE as usize);

pub struct EspFlashStorageDriver {
    flash: FlashStorage<'static>,
    base: u32,
}

impl EspFlashStorageDriver {
    pub fn new(flash: FlashStorage<'static>) -> Self {
        Self {
            flash,
            base: config::STORAGE.partition_offset,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn slot_addr(&self, slot: usize) -> u32 {
        self.base + slot as u32 * BLOCK_SIZE
    }
}

impl StorageDriver<SLOT_SIZE> for EspFlashStorageDriver {
    fn read(&mut self, slot: usize, buffer: &mut [u8; SLOT_SIZE]) -> Result<(), StorageError> {
        let addr = self.slot_addr(slot);
        self.flash.read(addr, buffer).map_err(|e| {
            warn!("flash: read at {:#x} failed: {:?}", addr, e);
            StorageError::DriverError
        })
    }

    fn write(&mut self, slot: usize, buffer: &[u8; SLOT_SIZE]) -> Result<(), StorageError> {
        let addr = self.slot_addr(slot);
        self.flash
            .erase(addr, addr + BLOCK_SIZE)
            .map_err(|_| StorageError::DriverError)?;
        self.flash.write(addr, buffer).map_err(|e| {
            warn!("flash: write at {:#x} failed: {:?}", addr, e);
            StorageError::DriverError
        })
    }
}
