mod flash_storage;
mod led_rmt;
mod wifi_sta;

pub use flash_storage::{EspFlashStorageDriver, SLOT_SIZE};
pub use led_rmt::EspStripDriver;
pub use wifi_sta::start_wifi_sta;
