//! Operating state of an instrument.
//!
//! `State` is a closed enumeration of five values. Each value has a long name
//! and a two-letter abbreviation, both held in immutable tables indexed by the
//! state's ordinal:
//!
//! | value | name      | abbreviation |
//! |-------|-----------|--------------|
//! | 0     | Undefined | NA           |
//! | 1     | Idle      | IN           |
//! | 2     | WarmUp    | WU           |
//! | 3     | Standby   | SB           |
//! | 4     | Measure   | MS           |
//!
//! Lookups from text are case-insensitive and fail instead of falling back to a
//! default state.

use crate::error::{PayloadError, PayloadResult};
use std::fmt;
use std::str::FromStr;

const NAMES: [&str; 5] = ["Undefined", "Idle", "WarmUp", "Standby", "Measure"];
const ABBREVIATIONS: [&str; 5] = ["NA", "IN", "WU", "SB", "MS"];

/// Operating state of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum State {
    /// Not yet known.
    #[default]
    Undefined = 0,
    /// Powered but inactive.
    Idle = 1,
    /// Warming up ahead of a measurement.
    WarmUp = 2,
    /// Ready to measure.
    Standby = 3,
    /// Measuring.
    Measure = 4,
}

impl State {
    /// All states in ordinal order.
    pub const ALL: [State; 5] = [
        State::Undefined,
        State::Idle,
        State::WarmUp,
        State::Standby,
        State::Measure,
    ];

    /// Look up a state by its two-letter abbreviation, ignoring case.
    pub fn from_abbreviation(text: &str) -> PayloadResult<Self> {
        let upper = text.to_uppercase();
        ABBREVIATIONS
            .iter()
            .position(|abbr| *abbr == upper)
            .map(|idx| Self::ALL[idx])
            .ok_or(PayloadError::InvalidAbbreviation(upper))
    }

    /// Look up a state by its long name, ignoring case.
    pub fn from_name(text: &str) -> PayloadResult<Self> {
        let lower = text.to_lowercase();
        NAMES
            .iter()
            .position(|name| name.to_lowercase() == lower)
            .map(|idx| Self::ALL[idx])
            .ok_or(PayloadError::InvalidName(lower))
    }

    /// Two-letter abbreviation, e.g. `"WU"`.
    pub fn abbreviation(self) -> &'static str {
        ABBREVIATIONS[self as usize]
    }

    /// Long name, e.g. `"WarmUp"`.
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Numeric value of the state.
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for State {
    type Error = PayloadError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(PayloadError::InvalidStateValue(value))
    }
}

/// Accepts either an abbreviation or a long name.
impl FromStr for State {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_abbreviation(s).or_else(|_| Self::from_name(s))
    }
}

/// Formats as the abbreviation, the compact form used in status displays.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_tables() {
        for state in State::ALL {
            assert_eq!(State::from_abbreviation(state.abbreviation()).unwrap(), state);
            assert_eq!(State::from_name(state.name()).unwrap(), state);
            assert_eq!(State::try_from(state.value()).unwrap(), state);
        }
    }

    #[test]
    fn test_lookups_ignore_case() {
        assert_eq!(State::from_abbreviation("wu").unwrap(), State::WarmUp);
        assert_eq!(State::from_abbreviation("WU").unwrap(), State::WarmUp);
        assert_eq!(State::from_abbreviation("Ms").unwrap(), State::Measure);
        assert_eq!(State::from_name("warmup").unwrap(), State::WarmUp);
        assert_eq!(State::from_name("STANDBY").unwrap(), State::Standby);
    }

    #[test]
    fn test_unknown_abbreviation() {
        let err = State::from_abbreviation("ZZ").unwrap_err();
        assert!(matches!(err, PayloadError::InvalidAbbreviation(ref s) if s == "ZZ"));
    }

    #[test]
    fn test_unknown_name() {
        let err = State::from_name("bogus").unwrap_err();
        assert!(matches!(err, PayloadError::InvalidName(ref s) if s == "bogus"));
    }

    #[test]
    fn test_abbreviation_is_not_a_name() {
        assert!(State::from_name("MS").is_err());
        assert!(State::from_abbreviation("Measure").is_err());
    }

    #[test]
    fn test_out_of_range_value() {
        assert!(matches!(
            State::try_from(5),
            Err(PayloadError::InvalidStateValue(5))
        ));
        assert!(State::try_from(255).is_err());
    }

    #[test]
    fn test_from_str_accepts_both_forms() {
        assert_eq!("sb".parse::<State>().unwrap(), State::Standby);
        assert_eq!("Idle".parse::<State>().unwrap(), State::Idle);
        assert!("nope".parse::<State>().is_err());
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(State::default(), State::Undefined);
        assert_eq!(State::Undefined.to_string(), "NA");
        assert_eq!(State::Measure.to_string(), "MS");
        assert_eq!(State::Measure.name(), "Measure");
    }
}
