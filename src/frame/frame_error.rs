use std::fmt;
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEncodeError {
    /// The payload length does not fit the 4-byte length field.
    PayloadTooLarge { len: usize },
}

impl fmt::Display for FrameEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameEncodeError::PayloadTooLarge { len } => write!(
                f,
                "payload of {} bytes exceeds the {} byte frame limit",
                len,
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for FrameEncodeError {}

impl From<FrameEncodeError> for io::Error {
    fn from(err: FrameEncodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameDecodeError {
    /// Fewer bytes than a frame header were supplied.
    IncompleteHeader,

    /// The declared payload length does not match the bytes that follow the header.
    LengthMismatch { declared: usize, actual: usize },

    /// Unknown frame kind, or a control frame with a malformed payload.
    CorruptFrame,
}

impl fmt::Display for FrameDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameDecodeError::IncompleteHeader => write!(f, "incomplete frame header"),
            FrameDecodeError::LengthMismatch { declared, actual } => write!(
                f,
                "frame declares {} payload bytes but carries {}",
                declared, actual
            ),
            FrameDecodeError::CorruptFrame => write!(f, "corrupt frame"),
        }
    }
}

impl std::error::Error for FrameDecodeError {}

impl From<FrameDecodeError> for io::Error {
    fn from(err: FrameDecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
