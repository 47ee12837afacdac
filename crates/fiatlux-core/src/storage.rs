const MAGIC_HEADER: u16 = 0xBEEF;
pub const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    DriverError,
    InvalidMagicHeader,
    InvalidData,
    BufferTooSmall,
}

/// Slot-addressed block storage.
///
/// Each slot holds one framed record of at most `SLOT_SIZE` bytes.
pub trait StorageDriver<const SLOT_SIZE: usize> {
    fn read(&mut self, slot: usize, buffer: &mut [u8; SLOT_SIZE]) -> Result<(), StorageError>;
    fn write(&mut self, slot: usize, buffer: &[u8; SLOT_SIZE]) -> Result<(), StorageError>;
}

/// Prefix `payload` with the magic header into `out`.
///
/// Returns the framed length.
pub fn frame(payload: &[u8], out: &mut [u8]) -> Result<usize, StorageError> {
    let total = MAGIC_HEADER_SIZE + payload.len();
    if out.len() < total {
        return Err(StorageError::BufferTooSmall);
    }
    out[..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
    out[MAGIC_HEADER_SIZE..total].copy_from_slice(payload);
    Ok(total)
}

/// Strip the magic header, returning everything after it.
pub fn unframe(buf: &[u8]) -> Result<&[u8], StorageError> {
    if buf.len() < MAGIC_HEADER_SIZE {
        return Err(StorageError::InvalidData);
    }
    let magic = u16::from_le_bytes([buf[0], buf[1]]);
    if magic != MAGIC_HEADER {
        return Err(StorageError::InvalidMagicHeader);
    }
    Ok(&buf[MAGIC_HEADER_SIZE..])
}

/// Persistent storage implementation using a storage driver.
pub struct PersistentStorage<D: StorageDriver<SLOT_SIZE>, const SLOT_SIZE: usize> {
    driver: D,
}

impl<D: StorageDriver<SLOT_SIZE>, const SLOT_SIZE: usize> PersistentStorage<D, SLOT_SIZE> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Read a slot and return its payload.
    pub fn load<'b>(
        &mut self,
        slot: usize,
        buffer: &'b mut [u8; SLOT_SIZE],
    ) -> Result<&'b [u8], StorageError> {
        self.driver.read(slot, buffer)?;
        unframe(buffer.as_slice())
    }

    /// Frame `payload` and write it to a slot.
    pub fn save(&mut self, slot: usize, payload: &[u8]) -> Result<(), StorageError> {
        let mut data = [0u8; SLOT_SIZE];
        frame(payload, &mut data)?;
        self.driver.write(slot, &data)
    }
}
