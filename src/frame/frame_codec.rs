use crate::{
    constants::{FRAME_HEADER_SIZE, FRAME_KIND_OFFSET, FRAME_LENGTH_OFFSET},
    frame::{Frame, FrameDecodeError, FrameEncodeError, FrameKind},
};

/// Provides encoding and decoding functionality for frames.
///
/// A frame is serialized as a 1-byte kind, a 4-byte little-endian payload
/// length and the payload itself. One encoded frame maps to one transport
/// message, so `decode` expects the buffer to hold exactly one frame.
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes a `Frame` into a byte vector.
    ///
    /// # Arguments
    ///
    /// * `frame` - The `Frame` to be encoded.
    ///
    /// # Returns
    ///
    /// The header followed by the payload, or `PayloadTooLarge` if the payload
    /// is longer than the length field can describe.
    pub fn encode(frame: &Frame) -> Result<Vec<u8>, FrameEncodeError> {
        let len = Self::payload_length(frame.payload.len())?;

        let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + frame.payload.len());

        buf.push(frame.kind.into());
        buf.extend(&len.to_le_bytes());
        buf.extend(&frame.payload);

        Ok(buf)
    }

    /// Converts a payload size into the value of the 4-byte length field.
    pub fn payload_length(len: usize) -> Result<u32, FrameEncodeError> {
        u32::try_from(len).map_err(|_| FrameEncodeError::PayloadTooLarge { len })
    }

    /// Decodes a byte slice holding exactly one frame.
    ///
    /// Returns an error if the header is truncated, the kind is unknown, or the
    /// declared payload length disagrees with the number of bytes present.
    pub fn decode(buf: &[u8]) -> Result<Frame, FrameDecodeError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(FrameDecodeError::IncompleteHeader);
        }

        let kind = FrameKind::try_from(buf[FRAME_KIND_OFFSET])
            .map_err(|_| FrameDecodeError::CorruptFrame)?;

        let len_bytes: [u8; 4] = buf[FRAME_LENGTH_OFFSET..FRAME_HEADER_SIZE]
            .try_into()
            .map_err(|_| FrameDecodeError::IncompleteHeader)?;
        let declared = u32::from_le_bytes(len_bytes) as usize;

        let payload = &buf[FRAME_HEADER_SIZE..];
        if payload.len() != declared {
            return Err(FrameDecodeError::LengthMismatch {
                declared,
                actual: payload.len(),
            });
        }

        Ok(Frame {
            kind,
            payload: payload.to_vec(),
        })
    }
}
