mod boot;
pub(crate) mod dependencies;
mod http;

pub use boot::BootController;
pub use http::StripHttpController;

use dependencies::STRIP_USECASES;

use crate::domain::types::StripControlPortRef;

/// Register the strip usecases and build the controllers using them
pub fn init_controllers(usecases: StripControlPortRef) -> (StripHttpController, BootController) {
    STRIP_USECASES.lock(|cell| {
        cell.borrow_mut().replace(usecases);
    });

    (StripHttpController, BootController)
}
