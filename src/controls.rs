//! Keyboard access to the parameter knobs, and the on-screen readout.

use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::nalgebra::{Point2, Point3};
use kiss3d::text::Font;
use kiss3d::window::Window;
use log::info;
use std::time::Instant;

use crate::driver::Driver;
use crate::params::Knob;
use crate::system::Phase;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextKnob,
    Adjust(i32),
    Reset,
}

pub fn command_for(key: Key) -> Option<Command> {
    match key {
        Key::Tab => Some(Command::NextKnob),
        Key::Up => Some(Command::Adjust(1)),
        Key::Down => Some(Command::Adjust(-1)),
        Key::R => Some(Command::Reset),
        _ => None,
    }
}

pub struct Controls {
    selected: Knob,
}

impl Controls {
    pub fn new() -> Self {
        Controls {
            selected: Knob::Speed,
        }
    }

    pub fn selected(&self) -> Knob {
        self.selected
    }

    pub fn apply(&mut self, command: Command, driver: &mut Driver, now: Instant) {
        match command {
            Command::NextKnob => self.selected = self.selected.next(),
            Command::Adjust(steps) => {
                driver.adjust(self.selected, steps, now);
            }
            Command::Reset => {
                info!("manual reset");
                driver.reset(now);
            }
        }
    }

    /// Drain pending key presses from `window` into `driver`.
    pub fn handle_events(&mut self, window: &mut Window, driver: &mut Driver, now: Instant) {
        for event in window.events().iter() {
            if let WindowEvent::Key(key, Action::Press, _) = event.value {
                if let Some(command) = command_for(key) {
                    self.apply(command, driver, now);
                }
            }
        }
    }

    /// Text block listing every knob, the selected one marked.
    pub fn readout(&self, driver: &Driver, now: Instant) -> String {
        let params = driver.params();
        let elapsed = driver.elapsed(now);
        let phase = Phase::at(params.since_startup(elapsed));

        let mut text = format!(
            "t = {:.1}s  {:?}  donut x{:.3}\n",
            elapsed,
            phase,
            driver.system().body().scale()
        );
        for knob in Knob::ALL {
            let marker = if knob == self.selected { ">" } else { " " };
            text.push_str(&format!("{} {}: {}\n", marker, knob.label(), knob.display(params)));
        }
        text.push_str("[Tab] select  [Up/Down] adjust  [R] reset");
        text
    }

    pub fn draw(&self, window: &mut Window, driver: &Driver, now: Instant) {
        window.draw_text(
            &self.readout(driver, now),
            &Point2::new(10.0, 10.0),
            36.0,
            &Font::default(),
            &Point3::new(1.0, 1.0, 1.0),
        );
    }
}

impl Default for Controls {
    fn default() -> Self {
        Controls::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_reports_phase_and_marks_selection() {
        use crate::params::Params;
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use std::time::Duration;

        let t0 = Instant::now();
        let mut driver = Driver::new(Params { count: 2, ..Params::default() }, StdRng::seed_from_u64(1), t0);
        let mut controls = Controls::new();
        controls.apply(Command::NextKnob, &mut driver, t0);

        let idle = controls.readout(&driver, t0 + Duration::from_millis(500));
        assert!(idle.starts_with("t = 0.5s  Idle"));
        assert!(idle.contains("> amplitude: 10.00"));

        let active = controls.readout(&driver, t0 + Duration::from_secs(2));
        assert!(active.contains("Active"));
    }

    #[test]
    fn key_bindings() {
        assert_eq!(command_for(Key::Tab), Some(Command::NextKnob));
        assert_eq!(command_for(Key::Up), Some(Command::Adjust(1)));
        assert_eq!(command_for(Key::Down), Some(Command::Adjust(-1)));
        assert_eq!(command_for(Key::R), Some(Command::Reset));
        assert_eq!(command_for(Key::Q), None);
    }
}
