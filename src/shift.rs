//! Domain-shift families.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Sequence length of a continuous domain shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftLength {
    X1,
    X10,
    X100,
}

impl ShiftLength {
    /// Path segment for this length (`1x`, `10x`, `100x`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X1 => "1x",
            Self::X10 => "10x",
            Self::X100 => "100x",
        }
    }
}

/// Which dataset variant to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftMode {
    #[default]
    Discrete,
    Continuous(ShiftLength),
}

impl ShiftMode {
    /// Every mode accepted on the command line.
    pub const ALL: [Self; 4] = [
        Self::Discrete,
        Self::Continuous(ShiftLength::X1),
        Self::Continuous(ShiftLength::X10),
        Self::Continuous(ShiftLength::X100),
    ];

    /// Root path segment of the family.
    #[must_use]
    pub const fn family(self) -> &'static str {
        match self {
            Self::Discrete => "discrete",
            Self::Continuous(_) => "continuous",
        }
    }

    /// Length segment, present only for continuous shifts.
    #[must_use]
    pub const fn length(self) -> Option<ShiftLength> {
        match self {
            Self::Discrete => None,
            Self::Continuous(length) => Some(length),
        }
    }
}

impl fmt::Display for ShiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length() {
            None => f.write_str(self.family()),
            Some(length) => write!(f, "{}/{}", self.family(), length.as_str()),
        }
    }
}

impl FromStr for ShiftMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.to_string() == s)
            .ok_or_else(|| {
                Error::InvalidSelection(format!(
                    "unknown shift '{s}', expected one of: discrete, continuous/1x, continuous/10x, continuous/100x"
                ))
            })
    }
}
