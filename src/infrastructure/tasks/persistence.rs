use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use log::{info, warn};

use crate::{
    config::{self, STRIP_COUNT},
    domain::ports::StripStorage,
    infrastructure::{
        repositories::FlashStripStorage,
        services::{STRIPS, StripIndexReceiver},
    },
};

/// Writes changed strips once no change arrived for the debounce delay
#[embassy_executor::task]
pub async fn persistence_task(mut storage: FlashStripStorage, receiver: StripIndexReceiver) {
    info!("persistence: starting persistence task");
    let delay = Duration::from_millis(config::STORAGE.write_debounce_ms);
    let mut dirty: u32 = 0;

    loop {
        if dirty == 0 {
            dirty |= index_bit(receiver.receive().await);
            continue;
        }

        match select(receiver.receive(), Timer::after(delay)).await {
            Either::First(index) => dirty |= index_bit(index),
            Either::Second(()) => {
                persist_dirty(&mut storage, dirty);
                dirty = 0;
            }
        }
    }
}

fn index_bit(index: usize) -> u32 {
    if index < STRIP_COUNT { 1 << index } else { 0 }
}

fn persist_dirty(storage: &mut FlashStripStorage, dirty: u32) {
    for index in (0..STRIP_COUNT).filter(|i| dirty & (1 << i) != 0) {
        let Some(snapshot) = STRIPS.lock(|cell| cell.borrow().get(index).cloned()) else {
            continue;
        };
        match storage.store(index, &snapshot) {
            Ok(()) => info!("persistence: strip {} saved", index),
            Err(e) => warn!("persistence: strip {} not saved: {:?}", index, e),
        }
    }
}
