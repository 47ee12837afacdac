mod clock;
mod persistence;
mod render;
mod strips;

pub use clock::ClockService;
pub use persistence::{StripPersistenceService, StripIndexReceiver, get_persistence_receiver};
pub use render::{RenderWakeService, take_wake_mask, wait_for_wake};
pub use strips::STRIPS;
