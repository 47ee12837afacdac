use log::{info, warn};

use fiatlux_strip::{Strip, StripConfig};

use super::dependencies::strip_usecases;
use crate::{
    config,
    domain::ports::{OnBootHandler, StripStorage, StripStorageError},
};

/// Restores every configured strip, falling back to defaults
#[derive(Default)]
pub struct BootController;

impl OnBootHandler for BootController {
    fn on_boot<S: StripStorage>(&self, storage: &mut S) {
        let Some(usecases) = strip_usecases() else {
            warn!("boot: strip usecases are not registered");
            return;
        };

        for (index, gpio) in config::STRIPS.gpios.into_iter().enumerate() {
            let strip = match storage.load(index) {
                Ok(strip) => {
                    info!("boot: strip {} restored ({} LEDs)", index, strip.num_leds());
                    strip
                }
                Err(e) => {
                    if !matches!(e, StripStorageError::NotFound) {
                        warn!("boot: strip {} record unusable: {:?}", index, e);
                    }
                    info!("boot: strip {} on GPIO{} uses defaults", index, gpio);
                    Strip::new(StripConfig::for_gpio(config::STRIPS.default_led_count, gpio))
                }
            };
            usecases.restore(strip);
        }
    }
}
