use crate::CallStatus;
use std::fmt;
use std::io;

/// The four failure classes a sampler call can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerErrorKind {
    InvalidBoundaries,
    PreconditionFailed,
    DimensionMismatch,
    TransportError,
}

/// Represents errors that can occur during a sampler call from the perspective
/// of the caller. None of these are recovered internally.
#[derive(Debug)]
pub enum SamplerError {
    /// The supplied region is empty, non-finite, or has `low > high` on an axis.
    InvalidBoundaries(String),

    /// A handle required by the operation has not been issued yet.
    PreconditionFailed(&'static str),

    /// A point has the wrong number of coordinates.
    DimensionMismatch { expected: usize, actual: usize },

    /// A flat coordinate buffer cannot be split into whole points.
    MisalignedChunk { dimension: usize, len: usize },

    /// `points` and `values` passed to posterior registration differ in length.
    LengthMismatch { points: usize, values: usize },

    /// A transport-level or I/O error occurred during the call.
    Transport(io::Error),

    /// The service answered the call with an error frame.
    Remote { status: CallStatus, message: String },
}

impl SamplerError {
    pub fn kind(&self) -> SamplerErrorKind {
        match self {
            SamplerError::InvalidBoundaries(_) => SamplerErrorKind::InvalidBoundaries,
            SamplerError::PreconditionFailed(_) => SamplerErrorKind::PreconditionFailed,
            SamplerError::DimensionMismatch { .. }
            | SamplerError::MisalignedChunk { .. }
            | SamplerError::LengthMismatch { .. } => SamplerErrorKind::DimensionMismatch,
            SamplerError::Transport(_) | SamplerError::Remote { .. } => {
                SamplerErrorKind::TransportError
            }
        }
    }
}

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerError::InvalidBoundaries(msg) => write!(f, "Invalid boundaries: {}", msg),
            SamplerError::PreconditionFailed(msg) => write!(f, "Precondition failed: {}", msg),
            SamplerError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: expected {} coordinates, got {}",
                expected, actual
            ),
            SamplerError::MisalignedChunk { dimension, len } => write!(
                f,
                "Dimension mismatch: chunk of {} coordinates is not a multiple of {}",
                len, dimension
            ),
            SamplerError::LengthMismatch { points, values } => write!(
                f,
                "Dimension mismatch: {} points but {} posterior values",
                points, values
            ),
            SamplerError::Transport(e) => write!(f, "Transport error: {}", e),
            SamplerError::Remote { status, message } => {
                write!(f, "Remote error ({:?}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for SamplerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SamplerError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SamplerError {
    fn from(e: io::Error) -> Self {
        SamplerError::Transport(e)
    }
}
