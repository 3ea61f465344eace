use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::protocol::{Frame, layout};
use crate::source::ByteEvent;

/// Counters describing what the synchronizer has seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub bytes_seen: u64,
    pub frames: u64,
    /// Bytes that never became part of an emitted frame.
    pub bytes_discarded: u64,
}

/// Recovers 14-byte frames from an undelimited byte stream.
///
/// Keeps a sliding window of the last 14 bytes. A frame is recognized when
/// the newest byte carries index 14 and the window's index nibbles read
/// 1..=14 in order; the window is then cleared so no byte is reused. Anything
/// else is noise and falls out of the window.
///
/// # Examples
/// ```
/// use mi23_core::{ByteEvent, FrameSynchronizer};
/// use time::OffsetDateTime;
///
/// let ts = OffsetDateTime::UNIX_EPOCH;
/// let mut sync = FrameSynchronizer::new();
/// let mut frames = Vec::new();
/// for byte in [0x00, 0x33, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90, 0xa0, 0xb0, 0xc0, 0xd0, 0xe0] {
///     frames.extend(sync.push(ByteEvent { ts, byte }));
/// }
/// assert_eq!(frames.len(), 1);
/// assert_eq!(sync.stats().bytes_discarded, 2);
/// ```
#[derive(Debug)]
pub struct FrameSynchronizer {
    window: VecDeque<ByteEvent>,
    stats: SyncStats,
}

impl Default for FrameSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(layout::FRAME_LEN),
            stats: SyncStats::default(),
        }
    }

    /// Feed one byte; returns a frame when this byte completes one.
    pub fn push(&mut self, event: ByteEvent) -> Option<Frame> {
        self.stats.bytes_seen += 1;
        if self.window.len() == layout::FRAME_LEN {
            if let Some(dropped) = self.window.pop_front() {
                self.stats.bytes_discarded += 1;
                trace!(byte = dropped.byte, "byte dropped from sync window");
            }
        }
        self.window.push_back(event);

        if layout::index_of(event.byte) != layout::TERMINATOR_INDEX
            || self.window.len() < layout::FRAME_LEN
        {
            return None;
        }

        let ts = self.window.front()?.ts;
        let mut bytes = [0u8; layout::FRAME_LEN];
        for (slot, event) in bytes.iter_mut().zip(&self.window) {
            *slot = event.byte;
        }
        match Frame::from_wire(ts, &bytes) {
            Ok(frame) => {
                self.window.clear();
                self.stats.frames += 1;
                debug!(frames = self.stats.frames, "frame recognized");
                Some(frame)
            }
            Err(err) => {
                trace!(%err, "terminator without a valid frame");
                None
            }
        }
    }

    /// Number of bytes currently held while waiting for a frame.
    pub fn pending(&self) -> usize {
        self.window.len()
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Drop any partial frame, e.g. after reopening the device.
    pub fn reset(&mut self) {
        self.stats.bytes_discarded += self.window.len() as u64;
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::FrameSynchronizer;
    use crate::protocol::Frame;
    use crate::source::ByteEvent;

    fn wire(nibbles: [u8; 14]) -> [u8; 14] {
        Frame::from_nibbles(OffsetDateTime::UNIX_EPOCH, nibbles).to_wire()
    }

    fn at(ms: i64) -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(ms)
    }

    /// Push bytes stamped 1 ms apart starting at `start_ms`.
    fn feed(sync: &mut FrameSynchronizer, start_ms: i64, bytes: &[u8]) -> Vec<Frame> {
        bytes
            .iter()
            .enumerate()
            .filter_map(|(i, &byte)| {
                sync.push(ByteEvent {
                    ts: at(start_ms + i as i64),
                    byte,
                })
            })
            .collect()
    }

    const PAYLOAD: [u8; 14] = [6, 8, 5, 0xd, 0xb, 1, 0xf, 2, 7, 0, 0, 0, 4, 0];

    #[test]
    fn frame_between_noise() {
        let mut bytes = vec![0x00, 0xe5, 0xff, 0x13];
        bytes.extend(wire(PAYLOAD));
        bytes.extend([0x02, 0xe0, 0x11]);

        let mut sync = FrameSynchronizer::new();
        let frames = feed(&mut sync, 0, &bytes);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].nibbles, PAYLOAD);
        assert_eq!(frames[0].ts, at(4));
        assert_eq!(sync.stats().frames, 1);
        assert_eq!(sync.stats().bytes_seen, bytes.len() as u64);
    }

    #[test]
    fn window_is_empty_after_frame() {
        let mut sync = FrameSynchronizer::new();
        let frames = feed(&mut sync, 0, &wire(PAYLOAD));
        assert_eq!(frames.len(), 1);
        assert_eq!(sync.pending(), 0);
    }

    #[test]
    fn back_to_back_frames() {
        let second = [0, 7, 0xd, 7, 0xd, 7, 0xd, 7, 0xd, 0, 0, 0, 0, 0];
        let mut bytes = wire(PAYLOAD).to_vec();
        bytes.extend(wire(second));

        let mut sync = FrameSynchronizer::new();
        let frames = feed(&mut sync, 100, &bytes);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].nibbles, PAYLOAD);
        assert_eq!(frames[1].nibbles, second);
        assert_eq!(frames[1].ts, at(114));
        assert_eq!(sync.stats().bytes_discarded, 0);
    }

    #[test]
    fn interrupted_frame_is_dropped() {
        let full = wire(PAYLOAD);
        let mut bytes = full[..9].to_vec();
        bytes.extend(full);

        let mut sync = FrameSynchronizer::new();
        let frames = feed(&mut sync, 0, &bytes);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].ts, at(9));
        assert_eq!(sync.stats().bytes_discarded, 9);
    }

    #[test]
    fn zero_index_noise_never_emits() {
        let mut sync = FrameSynchronizer::new();
        let noise: Vec<u8> = (0..5000u32).map(|i| (i % 16) as u8).collect();
        assert!(feed(&mut sync, 0, &noise).is_empty());
        assert!(sync.pending() <= 14);
        assert_eq!(sync.stats().bytes_discarded, 5000 - 14);
    }

    #[test]
    fn terminator_before_fourteen_bytes_is_ignored() {
        let full = wire(PAYLOAD);
        let mut sync = FrameSynchronizer::new();
        assert!(feed(&mut sync, 0, &full[5..]).is_empty());
        assert_eq!(sync.pending(), 9);
    }

    #[test]
    fn terminator_over_noise_keeps_window() {
        let mut bytes = vec![0x01; 13];
        bytes.push(0xe0);
        let mut sync = FrameSynchronizer::new();
        assert!(feed(&mut sync, 0, &bytes).is_empty());
        assert_eq!(sync.pending(), 14);
        assert_eq!(sync.stats().frames, 0);

        let frames = feed(&mut sync, 14, &wire(PAYLOAD));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].nibbles, PAYLOAD);
        assert_eq!(frames[0].ts, at(14));
    }

    #[test]
    fn reset_discards_partial_frame() {
        let full = wire(PAYLOAD);
        let mut sync = FrameSynchronizer::new();
        feed(&mut sync, 0, &full[..6]);
        sync.reset();
        assert_eq!(sync.pending(), 0);
        assert_eq!(sync.stats().bytes_discarded, 6);
        assert!(feed(&mut sync, 10, &full[6..]).is_empty());
    }
}
