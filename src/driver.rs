//! Frame driver: owns the clock, the parameter snapshot and the current
//! [`System`], and runs one tick per display refresh.

use log::{debug, info};
use rand::rngs::StdRng;
use std::time::Instant;

use crate::params::{Effect, Knob, Params};
use crate::system::{System, Tick};

/// Rendering backend handed the scene once per tick.
pub trait Display {
    fn present(&mut self, system: &System, now: Instant);
}

/// Scene clock. Restarted whenever the scene is regenerated.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn started_at(start: Instant) -> Self {
        Clock { start }
    }

    pub fn restart(&mut self, now: Instant) {
        self.start = now;
    }

    /// Seconds since the last (re)start.
    pub fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }
}

pub struct Driver {
    params: Params,
    system: System,
    clock: Clock,
    rng: StdRng,
}

impl Driver {
    pub fn new(params: Params, mut rng: StdRng, now: Instant) -> Self {
        let params = params.clamped();
        let system = System::new(params.count, &mut rng);
        info!(
            "scene created: {} particles, startup delay {:.2}s, collision delay {:.2}s",
            params.count, params.startup_delay, params.collision_delay
        );

        Driver {
            params,
            system,
            clock: Clock::started_at(now),
            rng,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn elapsed(&self, now: Instant) -> f32 {
        self.clock.elapsed(now)
    }

    /// One tick: update the scene and hand it to `display`.
    pub fn frame<D: Display + ?Sized>(&mut self, now: Instant, display: &mut D) -> Tick {
        let tick = self.step(now);
        display.present(&self.system, now);
        tick
    }

    /// Update the scene without presenting it.
    pub fn step(&mut self, now: Instant) -> Tick {
        let elapsed = self.clock.elapsed(now);
        let tick = self.system.tick(elapsed, now, &self.params);
        if tick.collisions > 0 {
            debug!(
                "{} collision(s) at t={:.2}s, donut scale {:.3}",
                tick.collisions,
                elapsed,
                self.system.body().scale()
            );
        }
        tick
    }

    /// Discard every particle and the torus, sample a new field and restart
    /// the clock.
    pub fn reset(&mut self, now: Instant) {
        self.system = self.system.regenerate(self.params.count, &mut self.rng);
        self.clock.restart(now);
        info!(
            "scene regenerated: generation {}, {} particles",
            self.system.generation(),
            self.params.count
        );
    }

    /// Move `knob` by `steps` and regenerate if the change requires it.
    pub fn adjust(&mut self, knob: Knob, steps: i32, now: Instant) -> Option<Effect> {
        let effect = knob.adjust(&mut self.params, steps)?;
        debug!("{} -> {}", knob.label(), knob.display(&self.params));
        if effect == Effect::Regenerate {
            self.reset(now);
        }
        Some(effect)
    }
}
