use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::domain::ports::StripRenderPort;

/// Bit per strip that must be redrawn at once
static WAKE_MASK: AtomicU32 = AtomicU32::new(0);
static WAKE_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderWakeService;

impl StripRenderPort for RenderWakeService {
    fn wake(&self, index: usize) {
        if index >= 32 {
            return;
        }
        WAKE_MASK.fetch_or(1 << index, Ordering::AcqRel);
        WAKE_SIGNAL.signal(());
    }
}

/// Strips woken since the last call
pub fn take_wake_mask() -> u32 {
    WAKE_MASK.swap(0, Ordering::AcqRel)
}

pub async fn wait_for_wake() {
    WAKE_SIGNAL.wait().await;
}
