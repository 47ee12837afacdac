mod strip_storage;

pub use strip_storage::FlashStripStorage;
