pub mod error;
pub mod math;
pub mod pathway;

pub use error::{PathsteerError, Result};
pub use pathway::{Pathway, PointProjection, TrianglePathway, TriangleSegment};
