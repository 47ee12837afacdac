use log::{debug, warn};

use fiatlux_strip::{Outcome, StripCommand};

use crate::domain::{
    ports::{StripControlPort, StripPersistencePort, StripRenderPort},
    types::{AppStrip, SharedStrips},
};

pub struct StripUsecases<R: StripRenderPort, P: StripPersistencePort> {
    strips: &'static SharedStrips,
    renderer: R,
    persistence: P,
}

impl<R: StripRenderPort, P: StripPersistencePort> StripUsecases<R, P> {
    pub fn new(strips: &'static SharedStrips, renderer: R, persistence: P) -> Self {
        Self {
            strips,
            renderer,
            persistence,
        }
    }
}

impl<R, P> StripControlPort for StripUsecases<R, P>
where
    R: StripRenderPort + Sync + Send,
    P: StripPersistencePort + Sync + Send,
{
    fn execute(&self, command: StripCommand) -> Outcome {
        let outcome = self
            .strips
            .lock(|cell| cell.borrow_mut().execute(command));

        if let Some(index) = outcome.changed() {
            debug!("strip: strip {} changed", index);
            self.renderer.wake(index);
            self.persistence.request_persist(index);
        }
        outcome
    }

    fn restore(&self, strip: AppStrip) {
        let pushed = self.strips.lock(|cell| {
            let mut strips = cell.borrow_mut();
            let index = strips.len();
            strips.push(strip).ok().map(|()| index)
        });
        match pushed {
            Some(index) => self.renderer.wake(index),
            None => warn!("strip: no room for another strip"),
        }
    }
}
