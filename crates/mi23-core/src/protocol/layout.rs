//! Wire layout of an MI-23 measurement frame.

/// Number of bytes (and data nibbles) in one frame.
pub const FRAME_LEN: usize = 14;

/// Frame index carried in the high nibble of the first byte.
pub const FIRST_INDEX: u8 = 1;
/// Frame index carried in the high nibble of the last byte.
pub const TERMINATOR_INDEX: u8 = 14;

pub const INDEX_SHIFT: u32 = 4;
pub const DATA_MASK: u8 = 0x0f;

/// Data-nibble offsets of the four display digits, leftmost first. Each pair
/// is (high nibble, low nibble) of one digit byte.
pub const DIGIT_PAIRS: [(usize, usize); 4] = [(1, 2), (3, 4), (5, 6), (7, 8)];

/// Shift of the high data nibble when two nibbles form one digit byte.
pub const DIGIT_HIGH_SHIFT: u32 = 4;

/// Sign on the leftmost digit, decimal point on the others.
pub const FLAG_MASK: u8 = 0x80;
pub const SEGMENT_MASK: u8 = 0x7f;

pub const SIGN_CHAR: char = '-';
pub const POINT_CHAR: char = '.';
/// Placeholder for segment patterns missing from the table.
pub const UNKNOWN_DIGIT: char = '?';

/// High nibble (frame index) of a wire byte.
pub fn index_of(byte: u8) -> u8 {
    byte >> INDEX_SHIFT
}

/// Low nibble (payload) of a wire byte.
pub fn data_of(byte: u8) -> u8 {
    byte & DATA_MASK
}
