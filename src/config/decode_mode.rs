//! Query decode modes.
//!
//! This module provides the [`QueryParamsDecodeMode`] enum selecting how
//! arrays inside a parameter record are written into a query string.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Strategy for serializing array parameters into a query string.
///
/// Objects are always written with bracketed keys (`filter[status]=open`);
/// the mode only changes how arrays are spelled.
///
/// # Example
///
/// ```rust
/// use resource_client::QueryParamsDecodeMode;
///
/// let mode: QueryParamsDecodeMode = "brackets".parse().unwrap();
/// assert_eq!(mode, QueryParamsDecodeMode::Brackets);
/// assert_eq!(mode.to_string(), "brackets");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueryParamsDecodeMode {
    /// `ids=1,2`
    #[default]
    Comma,
    /// `ids=1&ids=2`
    Repeat,
    /// `ids[]=1&ids[]=2`
    Brackets,
    /// `ids[0]=1&ids[1]=2`
    Indices,
}

impl QueryParamsDecodeMode {
    /// Returns the lowercase name of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Repeat => "repeat",
            Self::Brackets => "brackets",
            Self::Indices => "indices",
        }
    }
}

impl fmt::Display for QueryParamsDecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryParamsDecodeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "comma" => Ok(Self::Comma),
            "repeat" => Ok(Self::Repeat),
            "brackets" => Ok(Self::Brackets),
            "indices" => Ok(Self::Indices),
            _ => Err(ConfigError::InvalidDecodeMode { mode: s }),
        }
    }
}
