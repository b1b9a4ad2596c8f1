use rand::Rng;

use super::{Vector3, TOLERANCE};

/// Upper bound on rejection-sampling attempts.
///
/// The acceptance probability per draw is ~52% for the sphere and ~78.5% for
/// the disk, so this bound is effectively never reached with a uniform
/// generator; it exists so a pathological `Rng` cannot spin forever. On
/// exhaustion the samplers fall back to a deterministic in-bounds value.
const MAX_REJECTION_ITERATIONS: usize = 64;

/// Returns a vector uniformly distributed on the unit-radius disk in the
/// XZ (Y = 0) plane, centered at the origin.
///
/// Direction is random and length ranges over `[0, 1)`.
pub fn random_vector_on_unit_radius_xz_disk<R: Rng + ?Sized>(rng: &mut R) -> Vector3 {
    for _ in 0..MAX_REJECTION_ITERATIONS {
        let v = Vector3::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0));
        if v.norm_squared() < 1.0 {
            return v;
        }
    }
    Vector3::zeros()
}

/// Returns a vector uniformly distributed inside the unit-radius sphere
/// centered at the origin.
///
/// Direction is random and length ranges over `[0, 1)`.
pub fn random_vector_in_unit_radius_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vector3 {
    for _ in 0..MAX_REJECTION_ITERATIONS {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.norm_squared() < 1.0 {
            return v;
        }
    }
    Vector3::zeros()
}

/// Returns a random vector of length 1, uniformly distributed in direction.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3 {
    let v = random_vector_in_unit_radius_sphere(rng);
    let length = v.norm();
    if length < TOLERANCE {
        return Vector3::x();
    }
    v / length
}

/// Returns a random vector of length 1 lying in the XZ (Y = 0) plane.
pub fn random_unit_vector_on_xz_plane<R: Rng + ?Sized>(rng: &mut R) -> Vector3 {
    let mut v = random_vector_in_unit_radius_sphere(rng);
    v.y = 0.0;
    let length = v.norm();
    if length < TOLERANCE {
        return Vector3::x();
    }
    v / length
}
