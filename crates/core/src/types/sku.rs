//! Stock keeping unit type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Sku`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkuError {
    /// The input is empty or only whitespace.
    #[error("sku cannot be empty")]
    Empty,
}

/// A catalog SKU, the identity of a cart line.
///
/// Leading and trailing whitespace is trimmed on parse. Values read back from
/// storage are trusted as-is.
///
/// ## Examples
///
/// ```
/// use closeout_core::Sku;
///
/// assert_eq!(Sku::parse(" CL-1001 ").unwrap().as_str(), "CL-1001");
/// assert!(Sku::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Parse a `Sku` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`SkuError::Empty`] if the input is blank.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SkuError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
