use log::warn;
use static_cell::make_static;

use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use smart_leds::{RGB8, SmartLedsWrite};

use fiatlux_strip::strip::BYTES_PER_LED;

use crate::{config::MAX_LEDS, domain::ports::LedOutputPort};

type StripAdapter<'a> = SmartLedsAdapter<'a, { buffer_size(MAX_LEDS) }>;

/// WS2812 output for both strips
///
/// Each strip gets its own RMT channel so frames never interleave
/// on the wire.
pub struct EspStripDriver<'a> {
    adapters: [StripAdapter<'a>; 2],
}

impl<'a> EspStripDriver<'a> {
    /// Create the driver
    ///
    /// # Arguments
    /// * `rmt` - RMT peripheral
    /// * `pin0`, `pin1` - data lines of strip 0 and strip 1
    pub fn new<O0, O1>(rmt: RMT<'a>, pin0: O0, pin1: O1) -> Self
    where
        O0: PeripheralOutput<'a>,
        O1: PeripheralOutput<'a>,
    {
        let rmt = Rmt::new(rmt, Rate::from_mhz(80)).unwrap();

        let buffer0 = make_static!(smart_led_buffer!(MAX_LEDS));
        let buffer1 = make_static!(smart_led_buffer!(MAX_LEDS));

        Self {
            adapters: [
                SmartLedsAdapter::new(rmt.channel0, pin0, buffer0),
                SmartLedsAdapter::new(rmt.channel1, pin1, buffer1),
            ],
        }
    }
}

impl LedOutputPort for EspStripDriver<'static> {
    fn write_frame(&mut self, index: usize, frame: &[u8]) {
        let Some(adapter) = self.adapters.get_mut(index) else {
            warn!("led: no output for strip {}", index);
            return;
        };

        // The adapter emits GRB itself
        let colors = frame
            .chunks_exact(BYTES_PER_LED)
            .map(|grb| RGB8::new(grb[1], grb[0], grb[2]));

        if let Err(e) = interrupt::free(|| adapter.write(colors)) {
            warn!("led: strip {} write failed: {:?}", index, e);
        }
    }
}
