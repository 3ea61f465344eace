use time::OffsetDateTime;

use super::error::FrameError;
use super::layout;

/// One validated measurement frame: the 14 payload nibbles plus the arrival
/// time of its first byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub ts: OffsetDateTime,
    pub nibbles: [u8; layout::FRAME_LEN],
}

impl Frame {
    /// Build a frame from payload nibbles; values are masked to 4 bits.
    pub fn from_nibbles(ts: OffsetDateTime, nibbles: [u8; layout::FRAME_LEN]) -> Self {
        Self {
            ts,
            nibbles: nibbles.map(|n| n & layout::DATA_MASK),
        }
    }

    /// Validate 14 wire bytes (index nibbles 1..=14 in order) and keep their
    /// payload nibbles.
    ///
    /// # Errors
    /// Returns `FrameError` on a wrong length or an out-of-order index nibble.
    pub fn from_wire(ts: OffsetDateTime, bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != layout::FRAME_LEN {
            return Err(FrameError::WrongLength {
                actual: bytes.len(),
            });
        }
        let mut nibbles = [0u8; layout::FRAME_LEN];
        for (position, (&byte, slot)) in bytes.iter().zip(nibbles.iter_mut()).enumerate() {
            let expected = layout::FIRST_INDEX + position as u8;
            let actual = layout::index_of(byte);
            if actual != expected {
                return Err(FrameError::BadIndex {
                    position,
                    expected,
                    actual,
                });
            }
            *slot = layout::data_of(byte);
        }
        Ok(Self { ts, nibbles })
    }

    /// Re-encode the frame as wire bytes.
    pub fn to_wire(&self) -> [u8; layout::FRAME_LEN] {
        let mut bytes = [0u8; layout::FRAME_LEN];
        for (position, (byte, nibble)) in bytes.iter_mut().zip(self.nibbles).enumerate() {
            let index = layout::FIRST_INDEX + position as u8;
            *byte = (index << layout::INDEX_SHIFT) | nibble;
        }
        bytes
    }
}
