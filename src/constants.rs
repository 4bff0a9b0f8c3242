// Frame related constants
pub const FRAME_KIND_OFFSET: usize = 0;
pub const FRAME_LENGTH_OFFSET: usize = 1;
pub const FRAME_LENGTH_FIELD_SIZE: usize = 4;

/// Total size of the fixed-length frame header: 1-byte kind followed by the
/// 4-byte little-endian payload length.
pub const FRAME_HEADER_SIZE: usize = FRAME_LENGTH_OFFSET + FRAME_LENGTH_FIELD_SIZE; // 1 + 4 = 5

/// Size in bytes of the method ID (u64) carried by an `Open` frame.
pub const OPEN_FRAME_METHOD_ID_SIZE: usize = 8;

/// Byte offset of the 1-byte `CallStatus` within an `Error` frame payload.
/// The UTF-8 error message follows immediately after.
pub const ERROR_FRAME_STATUS_OFFSET: usize = 0;
pub const ERROR_FRAME_MESSAGE_OFFSET: usize = 1;
