use thiserror::Error;

/// Top-level error type for the pathsteer library.
#[derive(Debug, Error)]
pub enum PathsteerError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors raised while building a pathway.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("triangle strip needs at least 3 points, got {0}")]
    StripTooShort(usize),

    #[error("pathway needs at least one triangle")]
    NoTriangles,
}

/// Errors raised by projection and distance queries against a pathway.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("pathway has no segments")]
    EmptyPath,

    #[error("cyclic pathway has zero total length")]
    ZeroLengthPath,
}

/// Convenience type alias for results using [`PathsteerError`].
pub type Result<T> = std::result::Result<T, PathsteerError>;
