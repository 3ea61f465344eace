use super::{ByteEvent, ByteSource, SourceError};

/// In-memory source over pre-timestamped bytes; ends when the iterator does.
///
/// # Examples
/// ```
/// use mi23_core::{ByteEvent, ByteSource, EventSource};
/// use time::OffsetDateTime;
///
/// let ts = OffsetDateTime::UNIX_EPOCH;
/// let mut source = EventSource::new([ByteEvent { ts, byte: 0x10 }]);
/// assert_eq!(source.next_byte()?.map(|e| e.byte), Some(0x10));
/// assert!(source.next_byte()?.is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EventSource<I> {
    events: I,
}

impl<I: Iterator<Item = ByteEvent>> EventSource<I> {
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl<I: Iterator<Item = ByteEvent>> ByteSource for EventSource<I> {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        Ok(self.events.next())
    }
}
