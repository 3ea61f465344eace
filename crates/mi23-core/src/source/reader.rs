use std::io::{ErrorKind, Read};

use time::OffsetDateTime;
use tracing::trace;

use super::{ByteEvent, ByteSource, SourceError};

/// Source over any blocking reader: serial port, device node, captured file or
/// pipe. Each byte is stamped with the current UTC time when it is read.
///
/// Interrupted and timed-out reads are retried, so a serial port configured
/// with a read timeout simply waits for the meter. A zero-length read ends
/// the stream.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    return Ok(Some(ByteEvent {
                        ts: OffsetDateTime::now_utc(),
                        byte: buf[0],
                    }));
                }
                Err(err) if is_retryable(err.kind()) => {
                    trace!(kind = ?err.kind(), "byte read retried");
                }
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
    }
}

fn is_retryable(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::Interrupted | ErrorKind::TimedOut)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, ErrorKind, Read};

    use super::ReaderSource;
    use crate::source::{ByteSource, SourceError};

    /// Reader that fails with the queued errors before delegating.
    struct Flaky<R> {
        errors: Vec<ErrorKind>,
        inner: R,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.errors.pop() {
                Some(kind) => Err(io::Error::from(kind)),
                None => self.inner.read(buf),
            }
        }
    }

    #[test]
    fn reads_bytes_then_ends() {
        let mut source = ReaderSource::new(Cursor::new([0x1a, 0xe0]));
        assert_eq!(source.next_byte().unwrap().unwrap().byte, 0x1a);
        assert_eq!(source.next_byte().unwrap().unwrap().byte, 0xe0);
        assert!(source.next_byte().unwrap().is_none());
    }

    #[test]
    fn retries_timeouts_and_interrupts() {
        let reader = Flaky {
            errors: vec![ErrorKind::TimedOut, ErrorKind::Interrupted],
            inner: Cursor::new([0x42]),
        };
        let mut source = ReaderSource::new(reader);
        assert_eq!(source.next_byte().unwrap().unwrap().byte, 0x42);
    }

    #[test]
    fn reports_device_failure() {
        let reader = Flaky {
            errors: vec![ErrorKind::BrokenPipe],
            inner: Cursor::new([0x42]),
        };
        let mut source = ReaderSource::new(reader);
        let err = source.next_byte().unwrap_err();
        assert!(matches!(err, SourceError::Io(ref e) if e.kind() == ErrorKind::BrokenPipe));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
