//! Byte sources feeding the synchronizer.
//!
//! A source yields one byte at a time together with its arrival time.
//! `Ok(None)` signals end of stream; errors are device or I/O failures. Both
//! end the reading stream.

mod memory;
mod reader;

pub use memory::EventSource;
pub use reader::ReaderSource;

use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteEvent {
    pub ts: OffsetDateTime,
    pub byte: u8,
}

pub trait ByteSource {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        (**self).next_byte()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
