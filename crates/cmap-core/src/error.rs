//! Color-map error types.

use thiserror::Error;

/// Result type for color-map operations.
pub type CmapResult<T> = Result<T, CmapError>;

/// Errors that can occur during color-map construction and transforms.
#[derive(Debug, Error)]
pub enum CmapError {
    /// Name not present in the built-in registry.
    #[error("unknown colormap name: {0}")]
    UnknownName(String),

    /// Control-point list violates an ordering or range invariant.
    #[error("invalid control points: {0}")]
    InvalidControlPoints(String),

    /// Sample count too small to span [0, 1].
    #[error("invalid sample count: {0} (need at least 2)")]
    InvalidSampleCount(usize),

    /// A remapped position fell outside the [0, 1] domain.
    #[error("position {pos} outside [0, 1] after remap")]
    DomainViolation {
        /// The offending position.
        pos: f32,
    },

    /// Operation defined only for segmented maps was given a listed map.
    #[error("{op} requires a segmented colormap")]
    SegmentedRequired {
        /// Name of the rejected operation.
        op: &'static str,
    },
}
