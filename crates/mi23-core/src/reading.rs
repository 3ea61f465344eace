use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::protocol::{Mode, Unit, UnitPrefix};

/// One decoded measurement as shown on the meter display.
///
/// # Examples
/// ```
/// use mi23_core::{Mode, Reading, Unit, UnitPrefix};
/// use time::OffsetDateTime;
///
/// let reading = Reading {
///     timestamp: OffsetDateTime::UNIX_EPOCH,
///     digits: " 1.25".to_string(),
///     unit_prefix: Some(UnitPrefix::Milli),
///     unit: Some(Unit::Volt),
///     options: vec![Mode::Ac],
/// };
/// assert_eq!(reading.unit_label(), "mV");
/// assert_eq!(reading.value(), Some(1.25));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Arrival time of the frame's first byte (RFC3339 in JSON).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Display text: four digit characters with optional leading `-` and
    /// embedded `.`. Blank positions are spaces, unknown patterns `?`.
    pub digits: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_prefix: Option<UnitPrefix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    /// Active mode flags in table order.
    #[serde(default)]
    pub options: Vec<Mode>,
}

impl Reading {
    /// Displayed number, or `None` when the display shows overload (`L`),
    /// an unknown segment pattern or nothing at all.
    pub fn value(&self) -> Option<f64> {
        let compact: String = self.digits.chars().filter(|c| *c != ' ').collect();
        if compact.is_empty() || !compact.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        if !compact
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '.')
        {
            return None;
        }
        compact.parse().ok()
    }

    /// Displayed number in base units (prefix applied).
    pub fn scaled_value(&self) -> Option<f64> {
        let value = self.value()?;
        Some(match self.unit_prefix {
            Some(prefix) => value * prefix.factor(),
            None => value,
        })
    }

    /// Prefix and unit symbols joined, e.g. `"mV"`; empty when neither is set.
    pub fn unit_label(&self) -> String {
        let mut label = String::new();
        if let Some(prefix) = self.unit_prefix {
            label.push_str(prefix.symbol());
        }
        if let Some(unit) = self.unit {
            label.push_str(unit.symbol());
        }
        label
    }

    pub fn has_option(&self, mode: Mode) -> bool {
        self.options.contains(&mode)
    }

    /// Seconds since the Unix epoch with sub-second precision.
    pub fn unix_seconds(&self) -> f64 {
        self.timestamp.unix_timestamp_nanos() as f64 / 1e9
    }
}
