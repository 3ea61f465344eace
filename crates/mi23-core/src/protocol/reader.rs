use super::frame::Frame;
use super::layout;
use super::tables::BitFlag;

/// Read-only view over a frame's payload nibbles.
pub struct NibbleReader<'a> {
    nibbles: &'a [u8; layout::FRAME_LEN],
}

impl<'a> NibbleReader<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self {
            nibbles: &frame.nibbles,
        }
    }

    /// Digit byte for display position `position` (0 = leftmost).
    pub fn digit_byte(&self, position: usize) -> u8 {
        let (hi, lo) = layout::DIGIT_PAIRS[position];
        (self.nibbles[hi] << layout::DIGIT_HIGH_SHIFT) | self.nibbles[lo]
    }

    pub fn is_set<T>(&self, flag: &BitFlag<T>) -> bool {
        self.nibbles[flag.offset] & flag.mask != 0
    }

    /// Last entry of `table` whose bit is set.
    pub fn last_match<T: Copy>(&self, table: &[BitFlag<T>]) -> Option<T> {
        table
            .iter()
            .rev()
            .find(|flag| self.is_set(flag))
            .map(|flag| flag.symbol)
    }

    /// Every entry of `table` whose bit is set, in table order.
    pub fn all_matches<T: Copy>(&self, table: &[BitFlag<T>]) -> Vec<T> {
        table
            .iter()
            .filter(|flag| self.is_set(flag))
            .map(|flag| flag.symbol)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::NibbleReader;
    use crate::protocol::frame::Frame;
    use crate::protocol::tables::{BitFlag, MODES, Mode};

    fn frame(nibbles: [u8; 14]) -> Frame {
        Frame::from_nibbles(OffsetDateTime::UNIX_EPOCH, nibbles)
    }

    #[test]
    fn digit_byte_pairs_high_and_low_nibble() {
        let frame = frame([0, 0x8, 0x5, 0xd, 0xb, 0x1, 0xf, 0x2, 0x7, 0, 0, 0, 0, 0]);
        let reader = NibbleReader::new(&frame);
        assert_eq!(reader.digit_byte(0), 0x85);
        assert_eq!(reader.digit_byte(1), 0xdb);
        assert_eq!(reader.digit_byte(2), 0x1f);
        assert_eq!(reader.digit_byte(3), 0x27);
    }

    #[test]
    fn last_match_takes_final_entry() {
        let table = [
            BitFlag {
                offset: 0,
                mask: 0x1,
                symbol: 'a',
            },
            BitFlag {
                offset: 0,
                mask: 0x2,
                symbol: 'b',
            },
        ];
        let frame = frame([0x3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let reader = NibbleReader::new(&frame);
        assert_eq!(reader.last_match(&table), Some('b'));
        assert_eq!(reader.all_matches(&table), vec!['a', 'b']);
    }

    #[test]
    fn no_bits_no_matches() {
        let frame = frame([0; 14]);
        let reader = NibbleReader::new(&frame);
        assert_eq!(reader.last_match(&MODES), None::<Mode>);
        assert!(reader.all_matches(&MODES).is_empty());
    }
}
