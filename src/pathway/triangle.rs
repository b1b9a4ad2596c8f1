use crate::error::{ConstructionError, QueryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Pathway, PointProjection};

/// One triangular patch of a corridor.
///
/// Fully populated during pathway construction and immutable afterward.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSegment {
    apex: Point3,
    edge0: Vector3,
    edge1: Vector3,
    determinant: f64,
    point_on_path: Point3,
    tangent: Vector3,
    length: f64,
}

impl TriangleSegment {
    /// The triangle vertex the two edge vectors originate from.
    #[must_use]
    pub fn apex(&self) -> &Point3 {
        &self.apex
    }

    /// Vector from the apex to the triangle's second vertex.
    #[must_use]
    pub fn edge0(&self) -> &Vector3 {
        &self.edge0
    }

    /// Vector from the apex to the triangle's third vertex.
    #[must_use]
    pub fn edge1(&self) -> &Vector3 {
        &self.edge1
    }

    /// This segment's representative point on the corridor centerline.
    #[must_use]
    pub fn point_on_path(&self) -> &Point3 {
        &self.point_on_path
    }

    /// Unit direction toward the next segment's centerline point, or zero
    /// when that step has zero length.
    #[must_use]
    pub fn tangent(&self) -> &Vector3 {
        &self.tangent
    }

    /// Centerline distance to the next segment's centerline point.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The triangle's three corners.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.apex, self.apex + self.edge0, self.apex + self.edge1]
    }

    /// Closest point on this triangle to `source`, and whether that point is
    /// strictly interior to the triangle.
    ///
    /// Barycentric region analysis over the parameters `s` (along `edge0`)
    /// and `t` (along `edge1`): the point falls into one of seven regions
    /// (interior, three edges, three vertices), resolved by sequential
    /// comparisons against zero and the precomputed determinant.
    fn closest_point(&self, source: &Point3) -> (Point3, bool) {
        let v0 = self.apex - source;

        let a = self.edge0.norm_squared();
        let b = self.edge0.dot(&self.edge1);
        let c = self.edge1.norm_squared();
        let d = self.edge0.dot(&v0);
        let e = self.edge1.dot(&v0);

        let det = self.determinant;
        let mut s = b * e - c * d;
        let mut t = b * d - a * e;
        let mut inside = false;

        if s + t < det {
            if s < 0.0 {
                if t < 0.0 && d < 0.0 {
                    // Vertex region at the apex end of edge0.
                    s = clamped_ratio(-d, a);
                    t = 0.0;
                } else {
                    // Edge region along edge1.
                    s = 0.0;
                    t = clamped_ratio(-e, c);
                }
            } else if t < 0.0 {
                // Edge region along edge0.
                s = clamped_ratio(-d, a);
                t = 0.0;
            } else {
                // Interior region. The determinant is strictly positive here
                // (s + t >= 0 while s + t < det), so the division is safe.
                let inv_det = 1.0 / det;
                s *= inv_det;
                t *= inv_det;
                inside = true;
            }
        } else if s < 0.0 {
            let tmp0 = b + d;
            let tmp1 = c + e;
            if tmp1 > tmp0 {
                // Far-edge region between the two non-apex vertices.
                s = clamped_ratio(tmp1 - tmp0, a - 2.0 * b + c);
                t = 1.0 - s;
            } else {
                s = 0.0;
                t = clamped_ratio(-e, c);
            }
        } else if t < 0.0 {
            if a + d > b + e {
                s = clamped_ratio(c + e - b - d, a - 2.0 * b + c);
                t = 1.0 - s;
            } else {
                s = clamped_ratio(-e, c);
                t = 0.0;
            }
        } else {
            s = clamped_ratio(c + e - b - d, a - 2.0 * b + c);
            t = 1.0 - s;
        }

        (self.apex + self.edge0 * s + self.edge1 * t, inside)
    }
}

/// Clamped `numer / denom` with a fallback of 0 for degenerate (near-zero)
/// denominators, so zero-area triangles never divide by zero.
fn clamped_ratio(numer: f64, denom: f64) -> f64 {
    if denom.abs() < TOLERANCE {
        0.0
    } else {
        (numer / denom).clamp(0.0, 1.0)
    }
}

/// Per-triangle data computed before the centerline tangents are known.
struct Patch {
    apex: Point3,
    edge0: Vector3,
    edge1: Vector3,
    determinant: f64,
    point_on_path: Point3,
}

/// Best candidate found while scanning segments for a query point.
#[derive(Clone, Copy)]
struct SegmentHit {
    index: usize,
    on_triangle: Point3,
    distance_squared: f64,
    inside: bool,
}

/// A corridor pathway made of triangular segments.
///
/// Built once from a triangle strip or an explicit triangle list, then
/// queried read-only; there is no mutation API, so shared references may be
/// queried concurrently from any number of threads.
#[derive(Debug, Clone)]
pub struct TrianglePathway {
    segments: Vec<TriangleSegment>,
    cyclic: bool,
    total_length: f64,
}

impl TrianglePathway {
    /// Builds a pathway from a triangle strip of at least 3 points.
    ///
    /// N points produce N−2 triangles. Triangle `i` uses point `i` as its
    /// apex and alternates the order of the next two points (even `i` →
    /// `(i, i+1, i+2)`, odd `i` → `(i, i+2, i+1)`) so winding stays
    /// consistent across the strip's zig-zag.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 points are supplied.
    pub fn from_triangle_strip(points: &[Point3], cyclic: bool) -> Result<Self> {
        if points.len() < 3 {
            return Err(ConstructionError::StripTooShort(points.len()).into());
        }

        let triangles: Vec<[Point3; 3]> = points
            .windows(3)
            .enumerate()
            .map(|(i, w)| {
                if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[0], w[2], w[1]]
                }
            })
            .collect();

        Self::from_triangles(&triangles, cyclic)
    }

    /// Builds a pathway from an explicit sequence of triangles.
    ///
    /// Triangle corners are `[apex, b, c]`; the corridor centerline runs
    /// through the parity-selected edge midpoints in sequence order.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle list is empty.
    pub fn from_triangles(triangles: &[[Point3; 3]], cyclic: bool) -> Result<Self> {
        if triangles.is_empty() {
            return Err(ConstructionError::NoTriangles.into());
        }

        let patches: Vec<Patch> = triangles
            .iter()
            .enumerate()
            .map(|(i, tri)| {
                let [a, b, c] = *tri;
                let edge0 = b - a;
                let edge1 = c - a;
                let edge0_dot_edge1 = edge0.dot(&edge1);
                let determinant = edge0.norm_squared() * edge1.norm_squared()
                    - edge0_dot_edge1 * edge0_dot_edge1;

                // Centerline point: midpoint of the apex and the
                // parity-selected edge endpoint, tracing the strip zig-zag.
                let point_on_path = if i % 2 == 0 {
                    a + edge0 / 2.0
                } else {
                    a + edge1 / 2.0
                };

                Patch {
                    apex: a,
                    edge0,
                    edge1,
                    determinant,
                    point_on_path,
                }
            })
            .collect();

        let n = patches.len();
        let mut segments = Vec::with_capacity(n);
        let mut total_length = 0.0;

        for (i, patch) in patches.iter().enumerate() {
            // The last segment of an open path points at itself, which yields
            // a zero tangent and zero length.
            let next = if cyclic { (i + 1) % n } else { (i + 1).min(n - 1) };

            let to_next = patches[next].point_on_path - patch.point_on_path;
            let length = to_next.norm();
            let tangent = if length < TOLERANCE {
                Vector3::zeros()
            } else {
                to_next / length
            };
            total_length += length;

            segments.push(TriangleSegment {
                apex: patch.apex,
                edge0: patch.edge0,
                edge1: patch.edge1,
                determinant: patch.determinant,
                point_on_path: patch.point_on_path,
                tangent,
                length,
            });
        }

        Ok(Self {
            segments,
            cyclic,
            total_length,
        })
    }

    /// Read-only view of the corridor segments, in path order.
    #[must_use]
    pub fn segments(&self) -> &[TriangleSegment] {
        &self.segments
    }

    /// Enumerates the corner triples of the underlying triangles, for
    /// external visualization.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.segments.iter().map(TriangleSegment::vertices)
    }

    fn closest_segment(&self, point: &Point3) -> Result<SegmentHit> {
        let mut best: Option<SegmentHit> = None;

        for (index, segment) in self.segments.iter().enumerate() {
            let (on_triangle, inside) = segment.closest_point(point);
            let distance_squared = (point - on_triangle).norm_squared();

            if best.map_or(true, |hit| distance_squared < hit.distance_squared) {
                best = Some(SegmentHit {
                    index,
                    on_triangle,
                    distance_squared,
                    inside,
                });
            }

            // An interior hit is definitive: no other segment can claim a
            // point that is strictly inside this triangle.
            if inside {
                break;
            }
        }

        best.ok_or_else(|| QueryError::EmptyPath.into())
    }
}

impl Pathway for TrianglePathway {
    fn map_point_to_path(&self, point: &Point3) -> Result<PointProjection> {
        let hit = self.closest_segment(point)?;
        let sign = if hit.inside { -1.0 } else { 1.0 };

        Ok(PointProjection {
            on_path: hit.on_triangle,
            tangent: self.segments[hit.index].tangent,
            outside: hit.distance_squared.sqrt() * sign,
        })
    }

    fn map_path_distance_to_point(&self, path_distance: f64) -> Result<Point3> {
        let (first, last) = match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(QueryError::EmptyPath.into()),
        };

        let mut remaining = path_distance;
        if self.cyclic {
            if self.total_length < TOLERANCE {
                return Err(QueryError::ZeroLengthPath.into());
            }
            // Wrap into [0, total): negative distances wrap backward from
            // the path end.
            remaining = remaining.rem_euclid(self.total_length);
        } else {
            if remaining <= 0.0 {
                return Ok(first.point_on_path);
            }
            if remaining >= self.total_length {
                return Ok(last.point_on_path);
            }
        }

        // Walk segments in order, consuming whole segment lengths until the
        // remainder falls within one, then interpolate along its tangent.
        for segment in &self.segments {
            if remaining > segment.length {
                remaining -= segment.length;
            } else {
                return Ok(segment.point_on_path + segment.tangent * remaining);
            }
        }

        Ok(last.point_on_path)
    }

    fn map_point_to_path_distance(&self, point: &Point3) -> Result<f64> {
        let hit = self.closest_segment(point)?;
        // Arc length accumulated over the segments before the owning one.
        Ok(self.segments[..hit.index]
            .iter()
            .map(TriangleSegment::length)
            .sum())
    }

    fn total_path_length(&self) -> f64 {
        self.total_length
    }

    fn is_cyclic(&self) -> bool {
        self.cyclic
    }
}
