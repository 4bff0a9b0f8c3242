use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome of a call as reported by the service in an `Error` frame.
///
/// `Success` is implied by a normal `Data`*/`End` reply and is never sent
/// explicitly, but it keeps the byte values aligned across implementations.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum CallStatus {
    Success = 0,
    /// The service handler ran and rejected the call.
    Fail = 1,
    /// The request could not be decoded or violated the call shape.
    SystemError = 2,
    MethodNotFound = 3,
}
