//! Box-overlap trigger between particles and the torus. Nothing is pushed
//! apart.

use kiss3d::nalgebra::{Point3, Vector3};
use ncollide3d::bounding_volume::{self, BoundingVolume, AABB};
use std::time::Instant;

use crate::params::Params;
use crate::system::{CentralBody, Particle, SPHERE_RADIUS, TORUS_RADIUS, TUBE_RADIUS};
use crate::torus;

pub fn body_aabb(body: &CentralBody) -> AABB<f32> {
    let h = torus::half_extents(TORUS_RADIUS, TUBE_RADIUS) * body.scale();

    let mut corners = Vec::with_capacity(8);
    for &x in &[-h.x, h.x] {
        for &y in &[-h.y, h.y] {
            for &z in &[-h.z, h.z] {
                corners.push(Point3::new(x, y, z));
            }
        }
    }

    bounding_volume::point_cloud_aabb(&body.isometry(), &corners[..])
}

pub fn particle_aabb(particle: &Particle) -> AABB<f32> {
    let half = Vector3::repeat(SPHERE_RADIUS * particle.scale());
    let center = *particle.position();
    AABB::new(center - half, center + half)
}

/// Returns how many particles responded. Factors compound when several
/// particles hit in the same call.
pub fn respond(
    particles: &mut [Particle],
    body: &mut CentralBody,
    obstacle: &AABB<f32>,
    since_on: f32,
    now: Instant,
    params: &Params,
) -> usize {
    if since_on <= 0.0 {
        return 0;
    }

    let mut hits = 0;
    for p in particles.iter_mut() {
        if p.is_flashing() {
            continue;
        }
        if particle_aabb(p).intersects(obstacle) {
            body.shrink(params.donut_shrink);
            p.grow(params.particle_grow);
            p.flash(now);
            hits += 1;
        }
    }
    hits
}
