use crate::{
    CallStatus,
    constants::{ERROR_FRAME_MESSAGE_OFFSET, ERROR_FRAME_STATUS_OFFSET, OPEN_FRAME_METHOD_ID_SIZE},
    frame::{FrameDecodeError, FrameKind},
};

/// A single unit on a sampler channel.
///
/// Each transport message carries exactly one frame. Unlike a multiplexed
/// stream there is no stream or sequence ID: a channel is opened per call and
/// carries that call alone, so ordering is the transport's delivery order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The role of the frame within the call (`Open`, `Data`, `End`, `Error`).
    pub kind: FrameKind,

    /// The raw payload. Its interpretation depends on `kind`.
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn open(method_id: u64) -> Self {
        Frame {
            kind: FrameKind::Open,
            payload: method_id.to_le_bytes().to_vec(),
        }
    }

    pub fn data(payload: Vec<u8>) -> Self {
        Frame {
            kind: FrameKind::Data,
            payload,
        }
    }

    pub fn end() -> Self {
        Frame {
            kind: FrameKind::End,
            payload: Vec::new(),
        }
    }

    pub fn error(status: CallStatus, message: &str) -> Self {
        let mut payload = Vec::with_capacity(ERROR_FRAME_MESSAGE_OFFSET + message.len());
        payload.push(status.into());
        payload.extend_from_slice(message.as_bytes());

        Frame {
            kind: FrameKind::Error,
            payload,
        }
    }

    /// Extracts the method ID from an `Open` frame.
    pub fn method_id(&self) -> Result<u64, FrameDecodeError> {
        if self.kind != FrameKind::Open {
            return Err(FrameDecodeError::CorruptFrame);
        }

        let bytes: [u8; OPEN_FRAME_METHOD_ID_SIZE] = self
            .payload
            .as_slice()
            .try_into()
            .map_err(|_| FrameDecodeError::CorruptFrame)?;

        Ok(u64::from_le_bytes(bytes))
    }

    /// Splits an `Error` frame into its status and message.
    ///
    /// Invalid UTF-8 in the message is replaced rather than rejected; the
    /// status byte is what callers branch on.
    pub fn error_parts(&self) -> Result<(CallStatus, String), FrameDecodeError> {
        if self.kind != FrameKind::Error {
            return Err(FrameDecodeError::CorruptFrame);
        }

        let status = self
            .payload
            .get(ERROR_FRAME_STATUS_OFFSET)
            .copied()
            .and_then(|b| CallStatus::try_from(b).ok())
            .ok_or(FrameDecodeError::CorruptFrame)?;

        let message =
            String::from_utf8_lossy(&self.payload[ERROR_FRAME_MESSAGE_OFFSET..]).into_owned();

        Ok((status, message))
    }
}
