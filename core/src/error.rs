//! Construction errors

use thiserror::Error;

/// Reasons a maze cannot be built
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height was zero
    #[error("invalid maze dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    /// Width or height is above [`crate::MAX_DIMENSION`]
    #[error("maze dimensions {width}x{height} exceed the maximum of {max}")]
    TooLarge { width: usize, height: usize, max: usize },

    /// The finished grid had no cell reachable from both doors
    #[error("no reachable cell left for the key")]
    NoKeyCell,
}
