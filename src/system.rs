use kiss3d::nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use rand::Rng;
use std::time::{Duration, Instant};

use crate::collision;
use crate::params::Params;

pub const SPHERE_RADIUS: f32 = 0.2;
pub const TORUS_RADIUS: f32 = 1.0;
pub const TUBE_RADIUS: f32 = 0.4;

// Wall-clock, not scene time.
pub const FLASH_DURATION: Duration = Duration::from_millis(1000);

/// Motion function: position of a particle with drift `drift` at `tau`
/// seconds after startup. Stays at the origin until `tau` becomes positive.
pub fn coord(drift: &Vector3<f32>, tau: f32, speed: f32, amplitude: f32) -> Point3<f32> {
    if tau <= 0.0 {
        return Point3::origin();
    }

    Point3::new(
        amplitude * (tau * speed * drift.x).sin(),
        amplitude * (tau * speed * drift.y).sin(),
        amplitude * (tau * speed * drift.z).sin(),
    )
}

#[derive(Debug, Clone)]
pub struct Particle {
    drift: Vector3<f32>,
    position: Point3<f32>,
    scale: f32,
    flash_until: Option<Instant>,
}

impl Particle {
    pub fn new(drift: Vector3<f32>) -> Self {
        Particle {
            drift,
            position: Point3::origin(),
            scale: 1.0,
            flash_until: None,
        }
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Particle::new(Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        ))
    }

    pub fn drift(&self) -> &Vector3<f32> {
        &self.drift
    }

    pub fn position(&self) -> &Point3<f32> {
        &self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some()
    }

    pub(crate) fn flash(&mut self, now: Instant) {
        self.flash_until = Some(now + FLASH_DURATION);
    }

    pub(crate) fn grow(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn release(&mut self, now: Instant) {
        if matches!(self.flash_until, Some(until) if now >= until) {
            self.flash_until = None;
        }
    }

    fn advance(&mut self, tau: f32, params: &Params) {
        self.position = coord(&self.drift, tau, params.speed, params.amplitude);
    }
}

#[derive(Debug, Clone)]
pub struct CentralBody {
    scale: f32,
    yaw: f32,
}

impl CentralBody {
    pub fn new() -> Self {
        CentralBody { scale: 1.0, yaw: 0.0 }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw)
    }

    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::identity(), self.orientation())
    }

    pub(crate) fn shrink(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn spin(&mut self, elapsed: f32) {
        self.yaw += elapsed.cos() * 0.1;
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        CentralBody::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
}

impl Phase {
    pub fn at(tau: f32) -> Phase {
        if tau > 0.0 {
            Phase::Active
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub phase: Phase,
    pub collisions: usize,
}

pub struct System {
    particles: Vec<Particle>,
    body: CentralBody,
    generation: u64,
}

impl System {
    pub fn new<R: Rng + ?Sized>(n_particles: usize, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(n_particles);
        for _ in 0..n_particles {
            particles.push(Particle::sample(rng));
        }

        System {
            particles,
            body: CentralBody::new(),
            generation: 0,
        }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        System {
            particles,
            body: CentralBody::new(),
            generation: 0,
        }
    }

    pub fn regenerate<R: Rng + ?Sized>(&self, n_particles: usize, rng: &mut R) -> Self {
        let mut next = System::new(n_particles, rng);
        next.generation = self.generation + 1;
        next
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn body(&self) -> &CentralBody {
        &self.body
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `elapsed` is scene time; `now` drives highlight expiry.
    pub fn tick(&mut self, elapsed: f32, now: Instant, params: &Params) -> Tick {
        for p in self.particles.iter_mut() {
            p.release(now);
        }

        self.body.spin(elapsed);

        let tau = params.since_startup(elapsed);
        let phase = Phase::at(tau);
        let mut collisions = 0;

        if phase == Phase::Active {
            for p in self.particles.iter_mut() {
                p.advance(tau, params);
            }

            let obstacle = collision::body_aabb(&self.body);
            collisions = collision::respond(
                &mut self.particles,
                &mut self.body,
                &obstacle,
                params.since_collisions_on(elapsed),
                now,
                params,
            );
        }

        Tick { phase, collisions }
    }
}
