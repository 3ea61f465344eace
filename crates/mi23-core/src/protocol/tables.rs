//! Constant decode tables.
//!
//! Bit positions are part of the wire contract: a wrong entry silently yields
//! the wrong symbol. Table order matters for prefix/unit lookups, where the
//! last matching entry wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Segment bits `abcdefg`, laid out on the display as:
///
/// ```text
///      c
///   b     g
///      f
///   a     e
///      d
/// ```
pub const SEGMENT_DIGITS: [(u8, char); 12] = [
    (0x00, ' '),
    (0x05, '1'),
    (0x15, '7'),
    (0x1f, '3'),
    (0x27, '4'),
    (0x3e, '5'),
    (0x3f, '9'),
    (0x5b, '2'),
    (0x68, 'L'),
    (0x7d, '0'),
    (0x7e, '6'),
    (0x7f, '8'),
];

/// A symbol selected by one bit of one data nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFlag<T> {
    pub offset: usize,
    pub mask: u8,
    pub symbol: T,
}

const fn flag<T>(offset: usize, mask: u8, symbol: T) -> BitFlag<T> {
    BitFlag {
        offset,
        mask,
        symbol,
    }
}

/// Metric prefix shown in front of the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitPrefix {
    #[serde(rename = "u")]
    Micro,
    #[serde(rename = "n")]
    Nano,
    #[serde(rename = "k")]
    Kilo,
    #[serde(rename = "m")]
    Milli,
    #[serde(rename = "M")]
    Mega,
}

impl UnitPrefix {
    pub fn symbol(self) -> &'static str {
        match self {
            UnitPrefix::Micro => "u",
            UnitPrefix::Nano => "n",
            UnitPrefix::Kilo => "k",
            UnitPrefix::Milli => "m",
            UnitPrefix::Mega => "M",
        }
    }

    /// Multiplier that turns a displayed value into base units.
    pub fn factor(self) -> f64 {
        match self {
            UnitPrefix::Micro => 1e-6,
            UnitPrefix::Nano => 1e-9,
            UnitPrefix::Kilo => 1e3,
            UnitPrefix::Milli => 1e-3,
            UnitPrefix::Mega => 1e6,
        }
    }
}

impl fmt::Display for UnitPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "F")]
    Farad,
    #[serde(rename = "Ohm")]
    Ohm,
    #[serde(rename = "A")]
    Ampere,
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "Hz")]
    Hertz,
    #[serde(rename = "C")]
    Celsius,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Farad => "F",
            Unit::Ohm => "Ohm",
            Unit::Ampere => "A",
            Unit::Volt => "V",
            Unit::Hertz => "Hz",
            Unit::Celsius => "C",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Measurement mode flags; several can be active at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "DC")]
    Dc,
    #[serde(rename = "auto")]
    AutoRange,
    #[serde(rename = "rs232")]
    Rs232,
    #[serde(rename = "diode")]
    Diode,
    #[serde(rename = "buzzer")]
    Buzzer,
    #[serde(rename = "relative")]
    Relative,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Ac => "AC",
            Mode::Dc => "DC",
            Mode::AutoRange => "auto",
            Mode::Rs232 => "rs232",
            Mode::Diode => "diode",
            Mode::Buzzer => "buzzer",
            Mode::Relative => "relative",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const UNIT_PREFIXES: [BitFlag<UnitPrefix>; 5] = [
    flag(9, 0x8, UnitPrefix::Micro),
    flag(9, 0x4, UnitPrefix::Nano),
    flag(9, 0x2, UnitPrefix::Kilo),
    flag(10, 0x8, UnitPrefix::Milli),
    flag(10, 0x2, UnitPrefix::Mega),
];

pub const UNITS: [BitFlag<Unit>; 7] = [
    flag(10, 0x4, Unit::Percent),
    flag(11, 0x8, Unit::Farad),
    flag(11, 0x4, Unit::Ohm),
    flag(12, 0x8, Unit::Ampere),
    flag(12, 0x4, Unit::Volt),
    flag(12, 0x2, Unit::Hertz),
    flag(13, 0x4, Unit::Celsius),
];

pub const MODES: [BitFlag<Mode>; 7] = [
    flag(0, 0x8, Mode::Ac),
    flag(0, 0x4, Mode::Dc),
    flag(0, 0x2, Mode::AutoRange),
    flag(0, 0x1, Mode::Rs232),
    flag(9, 0x1, Mode::Diode),
    flag(10, 0x1, Mode::Buzzer),
    flag(11, 0x2, Mode::Relative),
];

/// Character for a 7-bit segment pattern, `None` when the pattern is unknown.
pub fn segment_char(pattern: u8) -> Option<char> {
    SEGMENT_DIGITS
        .iter()
        .find(|(bits, _)| *bits == pattern)
        .map(|(_, ch)| *ch)
}
