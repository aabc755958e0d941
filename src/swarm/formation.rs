//! Static target policies for the contracted and scattered formations.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Point on a sphere of random radius in `[r_min, r_max)`, direction uniform
/// over the sphere.
pub fn sample_sphere<R: Rng>(rng: &mut R, r_min: f32, r_max: f32) -> Vec3 {
    let phi = rng.gen_range(0.0..TAU);
    let cos_theta: f32 = rng.gen_range(-1.0..=1.0);
    let theta = cos_theta.acos();
    let radius = if r_max > r_min {
        rng.gen_range(r_min..r_max)
    } else {
        r_min
    };
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

/// Tight ball around the fist: radius jittered ±20%.
pub fn contracted_target<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    sample_sphere(rng, radius * 0.8, radius * 1.2)
}

/// Wide shell for the open hand: 50–100% of the scatter radius.
pub fn scattered_target<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    sample_sphere(rng, radius * 0.5, radius)
}
