//! Decoder core for the MI-23 family of multimeter serial telemetry.
//!
//! The meter streams 14-byte measurement frames at 2400 baud with no start
//! marker and no checksum. Every byte carries its position in the frame in the
//! high nibble (1..=14) and a payload nibble in the low nibble. This crate
//! turns such a byte stream into [`Reading`] values:
//! byte sources feed the frame synchronizer, which hands validated frames to
//! the stateless decoder (layout/tables/reader/parser).
//!
//! All device I/O stays in `source`; synchronization and decoding are pure
//! and never fail on malformed input. Noise is absorbed, unknown segment
//! patterns decode to `?`, and only end of stream or I/O failure is reported
//! to the caller.
//!
//! Invariants:
//! - The synchronizer window never holds more than one frame's worth of bytes.
//! - A frame is emitted only when its 14 index nibbles are exactly 1..=14.
//! - Decode tables are constant and disjoint per table.
//!
//! # Examples
//! ```
//! use std::io::Cursor;
//!
//! use mi23_core::{ReaderSource, ReadingStream};
//!
//! let bytes = [
//!     0x10, 0x27, 0x3d, 0x47, 0x5d, 0x67, 0x7d, 0x87, 0x9d, 0xa0, 0xb0, 0xc0, 0xd0, 0xe0,
//! ];
//! let mut stream = ReadingStream::new(ReaderSource::new(Cursor::new(bytes)));
//! let reading = stream.next_reading()?.expect("one frame");
//! assert_eq!(reading.digits, "0000");
//! assert!(stream.next_reading()?.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod protocol;
mod reading;
mod source;
mod stream;
mod sync;

pub use protocol::{Frame, FrameError, Mode, Unit, UnitPrefix, decode, layout};
pub use reading::Reading;
pub use source::{ByteEvent, ByteSource, EventSource, ReaderSource, SourceError};
pub use stream::{ReadingStream, StreamError, decode_bytes};
pub use sync::{FrameSynchronizer, SyncStats};

/// Nominal line speed of the meter's RS-232 interface.
pub const DEFAULT_BAUD_RATE: u32 = 2400;
