mod triangle;

pub use triangle::{TrianglePathway, TriangleSegment};

use crate::error::Result;
use crate::math::{Point3, Vector3};

/// Result of projecting a query point onto a pathway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointProjection {
    /// Closest point on the pathway corridor.
    pub on_path: Point3,
    /// Forward tangent of the corridor at the owning segment.
    pub tangent: Vector3,
    /// Signed distance to the corridor cross-section: negative means the
    /// query point is inside the corridor, positive means outside by that
    /// magnitude.
    pub outside: f64,
}

/// Trait for queryable path corridors in 3D space.
///
/// A pathway is immutable once built: it supports unlimited concurrent
/// read-only queries and exposes no mutation API.
pub trait Pathway {
    /// Projects `point` onto the pathway, returning the closest corridor
    /// point, the local tangent, and the signed outside distance.
    ///
    /// # Errors
    ///
    /// Returns an error if the pathway has no segments.
    fn map_point_to_path(&self, point: &Point3) -> Result<PointProjection>;

    /// Maps an arc-length distance along the pathway to a 3D point on its
    /// centerline.
    ///
    /// Cyclic pathways wrap `path_distance` into `[0, total_path_length)`
    /// (negative distances wrap backward from the end); open pathways clamp
    /// to their first/last centerline points.
    ///
    /// # Errors
    ///
    /// Returns an error if the pathway has no segments, or if it is cyclic
    /// with zero total length (no wrap modulus exists).
    fn map_path_distance_to_point(&self, path_distance: f64) -> Result<Point3>;

    /// Maps `point` to the arc-length distance of its owning segment's start
    /// along the pathway centerline.
    ///
    /// # Errors
    ///
    /// Returns an error if the pathway has no segments.
    fn map_point_to_path_distance(&self, point: &Point3) -> Result<f64>;

    /// Total arc length of the pathway centerline.
    fn total_path_length(&self) -> f64;

    /// Returns whether the pathway's end wraps back to its start.
    fn is_cyclic(&self) -> bool;
}
