use embassy_futures::select::select;
use embassy_time::{Duration, Instant, Timer};
use log::info;

use fiatlux_strip::{algorithm::IDLE_PERIOD_MS, strip::BYTES_PER_LED};

use crate::{
    config::{MAX_LEDS, STRIP_COUNT},
    domain::ports::{LedOutputPort, WallClock},
    infrastructure::{
        services::{ClockService, STRIPS, take_wake_mask, wait_for_wake},
        types::StripDriver,
    },
};

/// Redraws every strip on its own period.
///
/// A strip is rendered under the strip lock into a local frame, the frame is
/// pushed to the driver after the lock is released. Powered-off strips are
/// drawn dark once and then sleep until woken.
#[embassy_executor::task]
pub async fn strip_render_task(mut driver: StripDriver, clock: ClockService) {
    info!("strip: render task started");
    let mut frame = [0u8; MAX_LEDS * BYTES_PER_LED];
    let mut next_due = [Instant::now(); STRIP_COUNT];

    loop {
        let woken = take_wake_mask();
        let now = Instant::now();
        for (index, due) in next_due.iter_mut().enumerate() {
            if woken & (1 << index) != 0 {
                *due = now;
            }
        }

        let time = clock.now();
        for (index, due) in next_due.iter_mut().enumerate() {
            if *due > now {
                continue;
            }

            let rendered = STRIPS.lock(|cell| {
                let mut strips = cell.borrow_mut();
                let strip = strips.get_mut(index)?;
                if strip.is_on() {
                    strip.render(&time);
                }
                Some((strip.write_frame(&mut frame), strip.period_ms()))
            });

            *due = match rendered {
                Some((len, period)) => {
                    driver.write_frame(index, &frame[..len]);
                    match period {
                        Some(ms) => now + Duration::from_millis(u64::from(ms)),
                        None => Instant::MAX,
                    }
                }
                // Not restored yet, look again later
                None => now + Duration::from_millis(u64::from(IDLE_PERIOD_MS)),
            };
        }

        let deadline = next_due.iter().copied().min().unwrap_or(Instant::MAX);
        select(wait_for_wake(), Timer::at(deadline)).await;
    }
}
