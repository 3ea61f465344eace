use tracing::trace;

use super::frame::Frame;
use super::layout;
use super::reader::NibbleReader;
use super::tables::{MODES, UNIT_PREFIXES, UNITS, segment_char};
use crate::Reading;

/// Decode one frame into a reading. Never fails: unknown segment patterns
/// become `?` and missing prefix/unit bits leave those fields empty.
///
/// Prefix and unit take the last matching table entry when the meter sets
/// more than one bit; modes collect every set bit in table order.
pub fn decode(frame: &Frame) -> Reading {
    let reader = NibbleReader::new(frame);

    let digits = decode_digits(&reader);
    let unit_prefix = reader.last_match(&UNIT_PREFIXES);
    let unit = reader.last_match(&UNITS);
    let options = reader.all_matches(&MODES);

    trace!(%digits, ?unit_prefix, ?unit, ?options, "decoded frame");

    Reading {
        timestamp: frame.ts,
        digits,
        unit_prefix,
        unit,
        options,
    }
}

fn decode_digits(reader: &NibbleReader<'_>) -> String {
    let mut digits = String::with_capacity(layout::DIGIT_PAIRS.len() * 2);
    for position in 0..layout::DIGIT_PAIRS.len() {
        let digit_byte = reader.digit_byte(position);
        if digit_byte & layout::FLAG_MASK != 0 {
            digits.push(if position == 0 {
                layout::SIGN_CHAR
            } else {
                layout::POINT_CHAR
            });
        }
        let pattern = digit_byte & layout::SEGMENT_MASK;
        digits.push(segment_char(pattern).unwrap_or(layout::UNKNOWN_DIGIT));
    }
    digits
}
