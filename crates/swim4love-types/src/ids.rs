//! Identifier types for swimmers and leaderboard viewers.
//!
//! Swimmer ids are supplied by event volunteers (they are printed on the
//! swim cap), so they arrive as text and must pass [`is_valid_id`] before
//! they are turned into a [`SwimmerId`]. Viewer ids are generated by the
//! server for each `WebSocket` connection and only appear in logs.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of digits in a swimmer id.
pub const MAX_ID_DIGITS: usize = 6;

/// Why a piece of text was rejected as a swimmer id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The text was empty.
    #[error("swimmer id is empty")]
    Empty,

    /// The text is longer than [`MAX_ID_DIGITS`].
    #[error("swimmer id has {0} characters, at most {MAX_ID_DIGITS} allowed")]
    TooLong(usize),

    /// The text contains something other than ASCII digits.
    #[error("swimmer id must contain only digits")]
    NotNumeric,

    /// The id parsed to zero.
    #[error("swimmer id must be positive")]
    Zero,
}

/// Return `true` if `text` is a syntactically valid swimmer id.
///
/// A valid id is 1 to [`MAX_ID_DIGITS`] ASCII digits with a value above
/// zero. Leading zeros are allowed (`"007"` is id 7).
pub fn is_valid_id(text: &str) -> bool {
    SwimmerId::parse(text).is_ok()
}

/// Identifier of a swimmer. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SwimmerId(i32);

impl SwimmerId {
    /// Parse a swimmer id from submitted text.
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] describing the first rule the text breaks.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        if text.is_empty() {
            return Err(IdError::Empty);
        }
        if text.len() > MAX_ID_DIGITS {
            return Err(IdError::TooLong(text.len()));
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::NotNumeric);
        }
        // At most six digits, so this always fits in an i32.
        let value: i32 = text.parse().map_err(|_e| IdError::NotNumeric)?;
        Self::new(value).ok_or(IdError::Zero)
    }

    /// Wrap a raw integer, returning `None` unless it is positive.
    pub const fn new(value: i32) -> Option<Self> {
        if value > 0 { Some(Self(value)) } else { None }
    }

    /// Return the raw integer value.
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SwimmerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SwimmerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<i32> for SwimmerId {
    type Error = IdError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(IdError::Zero)
    }
}

impl From<SwimmerId> for i32 {
    fn from(id: SwimmerId) -> Self {
        id.0
    }
}

/// Identifier of one connected leaderboard viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewerId(pub Uuid);

impl ViewerId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
