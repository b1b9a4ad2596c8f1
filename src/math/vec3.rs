use super::{Point3, Vector3, TOLERANCE};

/// Returns the component of `v` parallel to `unit_basis`.
///
/// `unit_basis` must be unit length; the result is scaled by its norm
/// otherwise.
#[must_use]
pub fn parallel_component(v: &Vector3, unit_basis: &Vector3) -> Vector3 {
    unit_basis * v.dot(unit_basis)
}

/// Returns the component of `v` perpendicular to `unit_basis`.
///
/// `unit_basis` must be unit length.
#[must_use]
pub fn perpendicular_component(v: &Vector3, unit_basis: &Vector3) -> Vector3 {
    v - parallel_component(v, unit_basis)
}

/// Clamps the length of `v` to `max_length`.
///
/// A vector no longer than `max_length` is returned unaltered; a longer one
/// is rescaled to exactly `max_length`, keeping its direction. The zero
/// vector passes through unchanged.
#[must_use]
pub fn truncate_length(v: &Vector3, max_length: f64) -> Vector3 {
    let length_squared = v.norm_squared();
    if length_squared <= max_length * max_length {
        return *v;
    }
    v * (max_length / length_squared.sqrt())
}

/// Forces a vector onto the XZ ground plane by zeroing its Y component.
#[must_use]
pub fn set_y_to_zero(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, 0.0, v.z)
}

/// Rotates `v` about the global Y (up) axis by `angle` radians.
#[must_use]
pub fn rotate_about_global_y(v: &Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x * c + v.z * s, v.y, v.z * c - v.x * s)
}

/// Cached sine/cosine pair for repeated Y-axis rotations by one angle.
///
/// A fresh cache holds no value; the first call to
/// [`rotate_about_global_y_cached`] computes and stores the pair, and every
/// later call reuses it regardless of the angle it is passed. The caller owns
/// resetting the cache when the angle changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrigCache {
    sin_cos: Option<(f64, f64)>,
}

impl TrigCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_compute(&mut self, angle: f64) -> (f64, f64) {
        *self.sin_cos.get_or_insert_with(|| angle.sin_cos())
    }
}

/// Rotates `v` about the global Y axis, caching the trig computation.
///
/// Equivalent to [`rotate_about_global_y`] but amortizes the `sin`/`cos`
/// evaluation across many rotations by the same angle.
#[must_use]
pub fn rotate_about_global_y_cached(v: &Vector3, angle: f64, cache: &mut TrigCache) -> Vector3 {
    let (s, c) = cache.get_or_compute(angle);
    Vector3::new(v.x * c + v.z * s, v.y, v.z * c - v.x * s)
}

/// Wraps a position that has left a bounding sphere back inside it.
///
/// A point outside the sphere is pushed back by one diameter along its offset
/// from `center` (teleport-style wraparound, not a clamp); a point inside is
/// returned unchanged.
#[must_use]
pub fn spherical_wrap_around(point: &Point3, center: &Point3, radius: f64) -> Point3 {
    let offset = point - center;
    let r = offset.norm();
    if r > radius {
        point + (offset / r) * radius * -2.0
    } else {
        *point
    }
}

/// Clamps `source` to lie inside a cone around `basis`.
///
/// The cone's half-angle is `acos(cosine_of_cone_angle)` and its axis is the
/// unit vector `basis`. A vector already inside the cone, or a zero-length
/// vector, is returned unchanged; anything else is moved onto the cone
/// boundary with its original length preserved.
#[must_use]
pub fn limit_max_deviation_angle(
    source: &Vector3,
    cosine_of_cone_angle: f64,
    basis: &Vector3,
) -> Vector3 {
    limit_deviation_angle(true, source, cosine_of_cone_angle, basis)
}

/// Clamps `source` to lie outside a cone around `basis`.
///
/// Counterpart of [`limit_max_deviation_angle`]: vectors already outside the
/// cone pass through, vectors inside are moved onto the boundary, length
/// preserved.
#[must_use]
pub fn limit_min_deviation_angle(
    source: &Vector3,
    cosine_of_cone_angle: f64,
    basis: &Vector3,
) -> Vector3 {
    limit_deviation_angle(false, source, cosine_of_cone_angle, basis)
}

fn limit_deviation_angle(
    force_inside: bool,
    source: &Vector3,
    cosine_of_cone_angle: f64,
    basis: &Vector3,
) -> Vector3 {
    // A zero-length source has no direction to clamp.
    let source_length = source.norm();
    if source_length < TOLERANCE {
        return *source;
    }

    let direction = source / source_length;
    let cosine_of_source_angle = direction.dot(basis);

    // Already satisfies the inside/outside predicate.
    if force_inside {
        if cosine_of_source_angle >= cosine_of_cone_angle {
            return *source;
        }
    } else if cosine_of_source_angle <= cosine_of_cone_angle {
        return *source;
    }

    // Rebuild on the cone boundary, in the plane spanned by source and basis.
    let perp = perpendicular_component(source, basis);
    let perp_length = perp.norm();
    let unit_perp = if perp_length < TOLERANCE {
        // Source is (anti)parallel to the basis: any perpendicular plane works.
        find_perpendicular_in_3d(basis).normalize()
    } else {
        perp / perp_length
    };

    let perp_dist = (1.0 - cosine_of_cone_angle * cosine_of_cone_angle)
        .max(0.0)
        .sqrt();
    (basis * cosine_of_cone_angle + unit_perp * perp_dist) * source_length
}

/// Perpendicular distance from `point` to an infinite line.
///
/// The line passes through `line_origin` with direction `line_unit_tangent`,
/// which must be unit length.
#[must_use]
pub fn distance_from_line(
    point: &Point3,
    line_origin: &Point3,
    line_unit_tangent: &Vector3,
) -> f64 {
    let offset = point - line_origin;
    perpendicular_component(&offset, line_unit_tangent).norm()
}

/// Returns an arbitrary but deterministic vector perpendicular to `direction`.
///
/// Crosses `direction` with whichever world axis is least parallel to it
/// (smallest dot-product magnitude). The result is not normalized.
#[must_use]
pub fn find_perpendicular_in_3d(direction: &Vector3) -> Vector3 {
    let id = direction.x.abs();
    let jd = direction.y.abs();
    let kd = direction.z.abs();

    let quasi_perp = if id <= jd && id <= kd {
        Vector3::x()
    } else if jd <= id && jd <= kd {
        Vector3::y()
    } else {
        Vector3::z()
    };

    direction.cross(&quasi_perp)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    // ── parallel / perpendicular decomposition ──

    #[test]
    fn decomposition_recombines_to_original() {
        let vec = v(3.0, -2.0, 5.0);
        let basis = v(0.0, 1.0, 0.0);
        let sum = parallel_component(&vec, &basis) + perpendicular_component(&vec, &basis);
        assert_relative_eq!(sum, vec, epsilon = TOLERANCE);
    }

    #[test]
    fn parallel_component_lies_along_basis() {
        let par = parallel_component(&v(3.0, -2.0, 5.0), &v(0.0, 1.0, 0.0));
        assert_relative_eq!(par, v(0.0, -2.0, 0.0), epsilon = TOLERANCE);
    }

    #[test]
    fn perpendicular_component_is_orthogonal_to_basis() {
        let basis = v(1.0, 1.0, 0.0).normalize();
        let perp = perpendicular_component(&v(2.0, 0.0, 7.0), &basis);
        assert!(perp.dot(&basis).abs() < TOLERANCE);
    }

    // ── truncate_length ──

    #[test]
    fn truncate_short_vector_is_identity() {
        let vec = v(1.0, 2.0, 2.0); // length 3
        assert_eq!(truncate_length(&vec, 3.0), vec);
        assert_eq!(truncate_length(&vec, 10.0), vec);
    }

    #[test]
    fn truncate_long_vector_clamps_exactly() {
        let out = truncate_length(&v(3.0, 0.0, 4.0), 2.5);
        assert_relative_eq!(out.norm(), 2.5, epsilon = TOLERANCE);
        // Direction preserved.
        assert_relative_eq!(out, v(1.5, 0.0, 2.0), epsilon = TOLERANCE);
    }

    #[test]
    fn truncate_zero_vector_is_zero() {
        assert_eq!(truncate_length(&Vector3::zeros(), 1.0), Vector3::zeros());
    }

    // ── set_y_to_zero ──

    #[test]
    fn set_y_to_zero_keeps_xz() {
        assert_eq!(set_y_to_zero(&v(1.0, 5.0, -2.0)), v(1.0, 0.0, -2.0));
    }

    // ── rotation about global Y ──

    #[test]
    fn rotate_x_axis_quarter_turn() {
        let out = rotate_about_global_y(&v(1.0, 0.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(out, v(0.0, 0.0, -1.0), epsilon = TOLERANCE);
    }

    #[test]
    fn rotate_preserves_y_and_length() {
        let out = rotate_about_global_y(&v(1.0, 3.0, 2.0), 0.7);
        assert_relative_eq!(out.y, 3.0, epsilon = TOLERANCE);
        assert_relative_eq!(out.norm(), v(1.0, 3.0, 2.0).norm(), epsilon = TOLERANCE);
    }

    #[test]
    fn cached_rotation_matches_uncached() {
        let vec = v(2.0, 1.0, -3.0);
        let mut cache = TrigCache::new();
        let cached = rotate_about_global_y_cached(&vec, FRAC_PI_4, &mut cache);
        assert_relative_eq!(cached, rotate_about_global_y(&vec, FRAC_PI_4), epsilon = TOLERANCE);
    }

    #[test]
    fn cache_reuses_first_angle() {
        let vec = v(1.0, 0.0, 0.0);
        let mut cache = TrigCache::new();
        let first = rotate_about_global_y_cached(&vec, FRAC_PI_2, &mut cache);
        // Passing a different angle with the same cache reuses the stored pair.
        let second = rotate_about_global_y_cached(&vec, 0.0, &mut cache);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_angle_is_cached_like_any_other() {
        let vec = v(1.0, 0.0, 2.0);
        let mut cache = TrigCache::new();
        let out = rotate_about_global_y_cached(&vec, 0.0, &mut cache);
        assert_relative_eq!(out, vec, epsilon = TOLERANCE);
        // Still the identity after a second call with a different angle.
        let again = rotate_about_global_y_cached(&vec, FRAC_PI_2, &mut cache);
        assert_relative_eq!(again, vec, epsilon = TOLERANCE);
    }

    // ── spherical_wrap_around ──

    #[test]
    fn wrap_inside_sphere_unchanged() {
        let point = p(0.5, 0.0, 0.0);
        assert_eq!(spherical_wrap_around(&point, &p(0.0, 0.0, 0.0), 1.0), point);
    }

    #[test]
    fn wrap_outside_sphere_moves_back_by_diameter() {
        let out = spherical_wrap_around(&p(3.0, 0.0, 0.0), &p(0.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(out, p(1.0, 0.0, 0.0), epsilon = TOLERANCE);
    }

    // ── cone deviation limiting ──

    #[test]
    fn limit_max_inside_cone_unchanged() {
        let basis = v(1.0, 0.0, 0.0);
        let source = v(5.0, 0.1, 0.0);
        let cos45 = FRAC_PI_4.cos();
        assert_eq!(limit_max_deviation_angle(&source, cos45, &basis), source);
    }

    #[test]
    fn limit_max_outside_cone_lands_on_boundary() {
        let basis = v(1.0, 0.0, 0.0);
        let source = v(0.0, 3.0, 0.0); // 90° from basis
        let cos45 = FRAC_PI_4.cos();
        let out = limit_max_deviation_angle(&source, cos45, &basis);

        assert_relative_eq!(out.norm(), 3.0, epsilon = 1e-9);
        let cos_angle = out.normalize().dot(&basis);
        assert_relative_eq!(cos_angle, cos45, epsilon = 1e-9);
    }

    #[test]
    fn limit_max_zero_source_unchanged() {
        let out = limit_max_deviation_angle(&Vector3::zeros(), 0.5, &v(1.0, 0.0, 0.0));
        assert_eq!(out, Vector3::zeros());
    }

    #[test]
    fn limit_max_antiparallel_source_does_not_produce_nan() {
        let basis = v(1.0, 0.0, 0.0);
        let out = limit_max_deviation_angle(&v(-2.0, 0.0, 0.0), FRAC_PI_4.cos(), &basis);
        assert!(out.iter().all(|c| c.is_finite()));
        assert_relative_eq!(out.norm(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(out.normalize().dot(&basis), FRAC_PI_4.cos(), epsilon = 1e-9);
    }

    #[test]
    fn limit_min_outside_cone_unchanged() {
        let basis = v(1.0, 0.0, 0.0);
        let source = v(0.0, 2.0, 0.0); // 90° from basis, outside a 45° cone
        let cos45 = FRAC_PI_4.cos();
        assert_eq!(limit_min_deviation_angle(&source, cos45, &basis), source);
    }

    #[test]
    fn limit_min_inside_cone_pushed_to_boundary() {
        let basis = v(1.0, 0.0, 0.0);
        let source = v(4.0, 0.0, 0.0); // dead ahead
        let cos45 = FRAC_PI_4.cos();
        let out = limit_min_deviation_angle(&source, cos45, &basis);

        assert_relative_eq!(out.norm(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(out.normalize().dot(&basis), cos45, epsilon = 1e-9);
    }

    // ── distance_from_line ──

    #[test]
    fn distance_from_line_perpendicular_offset() {
        let d = distance_from_line(&p(0.0, 2.0, 0.0), &p(-5.0, 0.0, 0.0), &v(1.0, 0.0, 0.0));
        assert_relative_eq!(d, 2.0, epsilon = TOLERANCE);
    }

    #[test]
    fn distance_from_line_point_on_line_is_zero() {
        let d = distance_from_line(&p(7.0, 0.0, 0.0), &p(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0));
        assert!(d.abs() < TOLERANCE);
    }

    // ── find_perpendicular_in_3d ──

    #[test]
    fn perpendicular_is_orthogonal_and_nonzero() {
        for dir in [
            v(1.0, 0.0, 0.0),
            v(0.0, -1.0, 0.0),
            v(0.3, 0.4, -0.5),
            v(-2.0, 1.0, 7.0),
        ] {
            let perp = find_perpendicular_in_3d(&dir);
            assert!(perp.norm() > TOLERANCE, "degenerate perp for {dir:?}");
            assert!(
                perp.dot(&dir).abs() < TOLERANCE,
                "not perpendicular for {dir:?}"
            );
        }
    }

    #[test]
    fn perpendicular_is_deterministic() {
        let dir = v(0.3, 0.4, -0.5);
        assert_eq!(find_perpendicular_in_3d(&dir), find_perpendicular_in_3d(&dir));
    }
}
