//! Live-tunable scene parameters.
//!
//! [`Params`] is a plain `Copy` snapshot. The driver hands a reference to it
//! into every tick, so motion and collision never read ambient state.
//! Every field has fixed bounds; values coming from YAML, the command line or
//! the keyboard are clamped here and nowhere else.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub speed: f32,           // oscillation rate multiplier
    pub amplitude: f32,       // oscillation half-width per axis
    pub startup_delay: f32,   // seconds before particles start moving
    pub collision_delay: f32, // seconds after startup before collisions are tested
    pub count: usize,         // number of particles
    pub donut_shrink: f32,    // central body scale factor per collision, < 1
    pub particle_grow: f32,   // particle scale factor per collision, > 1
}

impl Default for Params {
    fn default() -> Self {
        Params {
            speed: 0.5,
            amplitude: 10.0,
            startup_delay: 1.0,
            collision_delay: 3.0,
            count: 500,
            donut_shrink: 0.99,
            particle_grow: 1.01,
        }
    }
}

impl Params {
    /// Copy of `self` with every field inside its knob bounds. Non-finite
    /// values fall back to the knob's default.
    pub fn clamped(&self) -> Params {
        let defaults = Params::default();
        let mut out = *self;
        for knob in Knob::ALL {
            let (lo, hi) = knob.bounds();
            let value = knob.get(self);
            let value = if value.is_finite() { value } else { knob.get(&defaults) };
            knob.set(&mut out, value.clamp(lo, hi));
        }
        out
    }

    pub fn since_startup(&self, elapsed: f32) -> f32 {
        elapsed - self.startup_delay
    }

    pub fn since_collisions_on(&self, elapsed: f32) -> f32 {
        self.since_startup(elapsed) - self.collision_delay
    }
}

/// What a parameter change requires from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Picked up by the next tick.
    Live,
    /// The particle field must be rebuilt and the clock restarted.
    Regenerate,
}

/// One tunable field of [`Params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    Speed,
    Amplitude,
    StartupDelay,
    CollisionDelay,
    Count,
    DonutShrink,
    ParticleGrow,
}

impl Knob {
    pub const ALL: [Knob; 7] = [
        Knob::Speed,
        Knob::Amplitude,
        Knob::StartupDelay,
        Knob::CollisionDelay,
        Knob::Count,
        Knob::DonutShrink,
        Knob::ParticleGrow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Knob::Speed => "speed",
            Knob::Amplitude => "amplitude",
            Knob::StartupDelay => "startup delay",
            Knob::CollisionDelay => "collision delay",
            Knob::Count => "count",
            Knob::DonutShrink => "donut shrink",
            Knob::ParticleGrow => "particle grow",
        }
    }

    pub fn bounds(self) -> (f32, f32) {
        match self {
            Knob::Speed => (0.0, 5.0),
            Knob::Amplitude => (0.0, 25.0),
            Knob::StartupDelay => (0.0, 10.0),
            Knob::CollisionDelay => (0.0, 10.0),
            Knob::Count => (1.0, 2000.0),
            Knob::DonutShrink => (0.9, 0.999),
            Knob::ParticleGrow => (1.001, 1.1),
        }
    }

    pub fn step(self) -> f32 {
        match self {
            Knob::Speed => 0.05,
            Knob::Amplitude => 0.5,
            Knob::StartupDelay | Knob::CollisionDelay => 0.5,
            Knob::Count => 50.0,
            Knob::DonutShrink | Knob::ParticleGrow => 0.001,
        }
    }

    pub fn effect(self) -> Effect {
        match self {
            Knob::StartupDelay | Knob::CollisionDelay | Knob::Count => Effect::Regenerate,
            _ => Effect::Live,
        }
    }

    pub fn get(self, params: &Params) -> f32 {
        match self {
            Knob::Speed => params.speed,
            Knob::Amplitude => params.amplitude,
            Knob::StartupDelay => params.startup_delay,
            Knob::CollisionDelay => params.collision_delay,
            Knob::Count => params.count as f32,
            Knob::DonutShrink => params.donut_shrink,
            Knob::ParticleGrow => params.particle_grow,
        }
    }

    fn set(self, params: &mut Params, value: f32) {
        match self {
            Knob::Speed => params.speed = value,
            Knob::Amplitude => params.amplitude = value,
            Knob::StartupDelay => params.startup_delay = value,
            Knob::CollisionDelay => params.collision_delay = value,
            Knob::Count => params.count = value.round() as usize,
            Knob::DonutShrink => params.donut_shrink = value,
            Knob::ParticleGrow => params.particle_grow = value,
        }
    }

    /// Move the knob by `steps` increments and clamp. Returns `None` when the
    /// value did not change (already at a bound).
    pub fn adjust(self, params: &mut Params, steps: i32) -> Option<Effect> {
        let (lo, hi) = self.bounds();
        let before = self.get(params);
        let after = (before + self.step() * steps as f32).clamp(lo, hi);
        self.set(params, after);
        if self.get(params) == before {
            None
        } else {
            Some(self.effect())
        }
    }

    pub fn next(self) -> Knob {
        let i = Knob::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Knob::ALL[(i + 1) % Knob::ALL.len()]
    }

    pub fn display(self, params: &Params) -> String {
        match self {
            Knob::Count => format!("{}", params.count),
            Knob::DonutShrink | Knob::ParticleGrow => format!("{:.3}", self.get(params)),
            _ => format!("{:.2}", self.get(params)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_inside_bounds() {
        let p = Params::default();
        assert_eq!(p.clamped(), p);
    }

    #[test]
    fn clamp_pulls_values_back() {
        let p = Params {
            speed: -1.0,
            count: 0,
            donut_shrink: 1.5,
            particle_grow: 0.5,
            ..Params::default()
        }
        .clamped();

        assert_eq!(p.speed, 0.0);
        assert_eq!(p.count, 1);
        assert_eq!(p.donut_shrink, 0.999);
        assert_eq!(p.particle_grow, 1.001);
    }

    #[test]
    fn non_finite_values_fall_back_to_defaults() {
        let p = Params {
            speed: f32::NAN,
            amplitude: f32::INFINITY,
            collision_delay: f32::NEG_INFINITY,
            donut_shrink: f32::NAN,
            ..Params::default()
        }
        .clamped();

        assert_eq!(p, Params::default());
    }

    #[test]
    fn count_and_delays_regenerate() {
        let mut p = Params::default();
        assert_eq!(Knob::Count.adjust(&mut p, 1), Some(Effect::Regenerate));
        assert_eq!(p.count, 550);
        assert_eq!(Knob::StartupDelay.adjust(&mut p, -1), Some(Effect::Regenerate));
        assert_eq!(Knob::CollisionDelay.adjust(&mut p, 1), Some(Effect::Regenerate));
        assert_eq!(Knob::Speed.adjust(&mut p, 1), Some(Effect::Live));
    }

    #[test]
    fn adjust_at_bound_is_noop() {
        let mut p = Params { startup_delay: 0.0, ..Params::default() };
        assert_eq!(Knob::StartupDelay.adjust(&mut p, -3), None);
        assert_eq!(p.startup_delay, 0.0);
    }

    #[test]
    fn knob_cycle_wraps() {
        let mut k = Knob::Speed;
        for _ in 0..Knob::ALL.len() {
            k = k.next();
        }
        assert_eq!(k, Knob::Speed);
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let p: Params = serde_yaml::from_str("speed: 1.5\ncount: 20\n").unwrap();
        assert_eq!(p.speed, 1.5);
        assert_eq!(p.count, 20);
        assert_eq!(p.amplitude, Params::default().amplitude);
    }

    #[test]
    fn yaml_rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<Params>("sped: 1.5\n").is_err());
    }
}
