use heapless::Vec;
use log::{info, warn};

use crate::{
    command::{Adjust, Mode, Settings, StripCommand},
    config::Algorithm,
    strip::Strip,
    view::{StripList, StripValues},
};

/// Response of an executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 200 with an empty body
    Empty,
    /// The UI selected another strip and must reload its controls
    Reload,
    Values(StripValues),
    Strips(StripList),
    /// Send the browser back to the main page
    Redirect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    changed: Option<usize>,
}

impl Outcome {
    const fn unchanged(reply: Reply) -> Self {
        Self {
            reply,
            changed: None,
        }
    }

    const fn changed_strip(reply: Reply, index: usize) -> Self {
        Self {
            reply,
            changed: Some(index),
        }
    }

    /// Index of the strip to redraw and persist, if any
    pub const fn changed(&self) -> Option<usize> {
        self.changed
    }
}

/// All strips of the controller plus the one the UI works on.
pub struct StripSet<const S: usize, const N: usize> {
    strips: Vec<Strip<N>, S>,
    selected: usize,
}

impl<const S: usize, const N: usize> Default for StripSet<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const S: usize, const N: usize> StripSet<S, N> {
    pub const fn new() -> Self {
        Self {
            strips: Vec::new(),
            selected: 0,
        }
    }

    /// Add a strip, handing it back when the set is full.
    pub fn push(&mut self, strip: Strip<N>) -> Result<(), Strip<N>> {
        self.strips.push(strip)
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn get(&self, index: usize) -> Option<&Strip<N>> {
        self.strips.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Strip<N>> {
        self.strips.get_mut(index)
    }

    /// Select a strip. Returns `true` when the selection moved.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.strips.len() {
            warn!("strips: no strip {}", index);
            return false;
        }
        let moved = index != self.selected;
        self.selected = index;
        moved
    }

    pub fn strip_list(&self) -> StripList {
        let mut name = Vec::new();
        for strip in &self.strips {
            if name.push(strip.config().name.clone()).is_err() {
                break;
            }
        }
        StripList {
            nr_strips: self.strips.len(),
            name,
            selected_strip: self.selected,
        }
    }

    pub fn execute(&mut self, command: StripCommand) -> Outcome {
        match command {
            StripCommand::Values { strip } => {
                let index = strip.filter(|i| *i < self.strips.len()).unwrap_or(self.selected);
                match self.strips.get(index) {
                    Some(strip) => Outcome::unchanged(Reply::Values(StripValues::from(strip.config()))),
                    None => Outcome::unchanged(Reply::Empty),
                }
            }
            StripCommand::Strips => Outcome::unchanged(Reply::Strips(self.strip_list())),
            StripCommand::Mode {
                mode,
                adjust,
                strip,
            } => {
                let reload = strip.is_some_and(|index| self.select(index));
                let index = self.selected;
                let Some(strip) = self.strips.get_mut(index) else {
                    return Outcome::unchanged(Reply::Empty);
                };
                apply_mode(strip, mode, adjust);
                let reply = if reload { Reply::Reload } else { Reply::Empty };
                Outcome::changed_strip(reply, index)
            }
            StripCommand::Power => {
                let index = self.selected;
                let Some(strip) = self.strips.get_mut(index) else {
                    return Outcome::unchanged(Reply::Empty);
                };
                let on = strip.toggle_power();
                info!("strips: strip {} power {}", index, if on { "on" } else { "off" });
                Outcome::changed_strip(Reply::Empty, index)
            }
            StripCommand::Settings(settings) => {
                let index = self.selected;
                let Some(strip) = self.strips.get_mut(index) else {
                    return Outcome::unchanged(Reply::Redirect);
                };
                apply_settings(strip, settings);
                Outcome::changed_strip(Reply::Redirect, index)
            }
        }
    }
}

fn apply_mode<const N: usize>(strip: &mut Strip<N>, mode: Mode, adjust: Adjust) {
    strip.set_channels(adjust.red, adjust.green, adjust.blue);
    if let Some(bright) = adjust.bright {
        strip.set_bright(bright);
    }
    if let Some(speed) = adjust.speed {
        strip.set_speed(speed);
    }

    let color = strip.config().color1;
    match mode {
        Mode::Led => {
            if strip.algorithm() == Algorithm::Walk {
                strip.first_led(color);
            }
        }
        Mode::Mono => strip.set_algorithm(Algorithm::Mono),
        Mode::Gradient => {
            strip.set_algorithm(Algorithm::Gradient);
            // a rejected stop leaves the strip as it was
            let _ = strip.add_gradient(color);
        }
        Mode::Rainbow => strip.set_algorithm(Algorithm::Rainbow),
        Mode::RainbowClock => strip.set_algorithm(Algorithm::RainbowClock),
        Mode::Walk => {
            strip.dark();
            strip.set_algorithm(Algorithm::Walk);
            strip.first_led(color);
        }
        Mode::Speed => {}
        Mode::Clock2 => strip.set_algorithm(Algorithm::Clock2),
    }
    strip.switch_on();
}

fn apply_settings<const N: usize>(strip: &mut Strip<N>, settings: Settings) {
    if let Some(nr_leds) = settings.nr_leds {
        strip.set_num_leds(nr_leds);
    }
    if let Some(counterclock) = settings.counterclock {
        strip.set_counterclock(counterclock);
    }
    if let Some(led1) = settings.led1 {
        strip.set_led1(led1);
    }
    if let Some(name) = settings.name.as_deref() {
        strip.set_name(name);
    }
    info!(
        "strips: settings {} LEDs, first {}, {}",
        strip.num_leds(),
        strip.config().led1,
        strip.config().rotation()
    );
}
