use num_enum::{IntoPrimitive, TryFromPrimitive};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum FrameKind {
    /// Starts a call. The payload is the 8-byte method ID.
    Open = 0,
    /// One encoded request or response message.
    Data = 1,
    /// Closes the sending half of the call.
    End = 2,
    /// Terminates the call with a status byte and a UTF-8 message.
    Error = 3,
}
