use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::Reading;
use crate::protocol::decode;
use crate::source::{ByteEvent, ByteSource, SourceError};
use crate::sync::{FrameSynchronizer, SyncStats};

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Pulls bytes from a source and yields decoded readings in arrival order.
pub struct ReadingStream<S> {
    source: S,
    sync: FrameSynchronizer,
    finished: bool,
}

impl<S: ByteSource> ReadingStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sync: FrameSynchronizer::new(),
            finished: false,
        }
    }

    /// Block until the next frame is decoded.
    ///
    /// Returns `Ok(None)` once the source reports end of stream; any partial
    /// frame still buffered at that point is dropped.
    ///
    /// # Errors
    /// Returns `StreamError::Source` when the byte source fails. The failure
    /// ends the stream: later calls return `Ok(None)` without touching the
    /// source.
    pub fn next_reading(&mut self) -> Result<Option<Reading>, StreamError> {
        if self.finished {
            return Ok(None);
        }
        loop {
            let event = match self.source.next_byte() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(err) => {
                    self.finished = true;
                    warn!(%err, "byte source failed");
                    return Err(err.into());
                }
            };
            if let Some(frame) = self.sync.push(event) {
                return Ok(Some(decode(&frame)));
            }
        }
        self.finished = true;
        let stats = self.sync.stats();
        debug!(
            bytes_seen = stats.bytes_seen,
            frames = stats.frames,
            pending = self.sync.pending(),
            "byte source ended"
        );
        Ok(None)
    }

    pub fn stats(&self) -> SyncStats {
        self.sync.stats()
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: ByteSource> Iterator for ReadingStream<S> {
    type Item = Result<Reading, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_reading().transpose()
    }
}

/// Decode every frame in an already captured buffer, stamping all bytes with
/// `ts`.
///
/// # Examples
/// ```
/// use mi23_core::{Unit, decode_bytes};
/// use time::OffsetDateTime;
///
/// let bytes = [
///     0x16, 0x28, 0x35, 0x4d, 0x5b, 0x61, 0x7f, 0x82, 0x97, 0xa0, 0xb0, 0xc0, 0xd4, 0xe0,
/// ];
/// let readings = decode_bytes(OffsetDateTime::UNIX_EPOCH, &bytes);
/// assert_eq!(readings[0].digits, "-1.234");
/// assert_eq!(readings[0].unit, Some(Unit::Volt));
/// ```
pub fn decode_bytes(ts: OffsetDateTime, bytes: &[u8]) -> Vec<Reading> {
    let mut sync = FrameSynchronizer::new();
    bytes
        .iter()
        .filter_map(|&byte| sync.push(ByteEvent { ts, byte }))
        .map(|frame| decode(&frame))
        .collect()
}
