use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::domain::types::StripControlPortRef;

pub(crate) static STRIP_USECASES: Mutex<
    CriticalSectionRawMutex,
    RefCell<Option<StripControlPortRef>>,
> = Mutex::new(RefCell::new(None));

/// Strip usecases registered by [`init_controllers`](super::init_controllers)
pub(crate) fn strip_usecases() -> Option<StripControlPortRef> {
    STRIP_USECASES.lock(|cell| *cell.borrow())
}
