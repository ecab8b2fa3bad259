/// Errors reported by the triangulation engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// every slot of the triangle pool is in use, the pool is too small for the point count
    #[error("triangle pool exhausted, capacity {capacity}")]
    PoolExhausted { capacity: usize },

    #[error("playground radius must be positive and finite, got {0}")]
    InvalidPlayground(f64),

    #[error("super triangle margin must be finite and greater than 1, got {0}")]
    InvalidSuperTriangleMargin(f64),

    #[error("invalid point range, min {min} is greater than max {max}")]
    InvalidPointRange { min: usize, max: usize },

    #[error("point speed must be non negative and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("triangles per point must be at least 2, got {0}")]
    InvalidTrianglesPerPoint(usize),

    #[cfg(feature = "draw")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
