use thiserror::Error;

/// Errors returned when raw wire bytes do not form a frame.
///
/// # Examples
/// ```
/// use mi23_core::{Frame, FrameError};
/// use time::OffsetDateTime;
///
/// let err = Frame::from_wire(OffsetDateTime::UNIX_EPOCH, &[0x10, 0x20]).unwrap_err();
/// assert!(matches!(err, FrameError::WrongLength { actual: 2 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame must be 14 bytes, got {actual}")]
    WrongLength { actual: usize },
    #[error("byte {position} carries frame index {actual}, expected {expected}")]
    BadIndex {
        position: usize,
        expected: u8,
        actual: u8,
    },
}
