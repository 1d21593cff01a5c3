//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA-1 hex)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use revinfo::core::types::Oid;
//!
//! let oid = Oid::new("c1ee41c325d54f410b133e0018c7a6b1316f6cda").unwrap();
//! assert_eq!(oid.short(10), "c1ee41c325");
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A validated Git object id.
///
/// Object ids are 40 lowercase hex characters (SHA-1). Everything in the
/// on-disk formats this crate decodes (HEAD, loose refs, packed-refs,
/// commit and tag object headers) carries ids in this form. The id is an
/// opaque content address here; it is never recomputed from object bytes.
///
/// # Example
///
/// ```
/// use revinfo::core::types::Oid;
///
/// // Normalized to lowercase
/// let oid = Oid::new("C1EE41C325D54F410B133E0018C7A6B1316F6CDA").unwrap();
/// assert_eq!(oid.as_str(), "c1ee41c325d54f410b133e0018c7a6b1316f6cda");
///
/// // Wrong length or non-hex input fails at creation time
/// assert!(Oid::new("c1ee41c").is_err());
/// assert!(Oid::new("zz").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// The id is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not exactly 40 hex
    /// characters.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters. If `len` exceeds the id length,
    /// returns the full id.
    ///
    /// # Example
    ///
    /// ```
    /// use revinfo::core::types::Oid;
    ///
    /// let oid = Oid::new("9dac893d5a83c02344d91e79dad8904889aeacb1").unwrap();
    /// assert_eq!(oid.short(10), "9dac893d5a");
    /// ```
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// The directory/file split used by the loose object store:
    /// `objects/<first two chars>/<remaining 38>`.
    pub fn split_loose(&self) -> (&str, &str) {
        self.0.split_at(2)
    }

    /// Validate an object id.
    fn validate(oid: &str) -> Result<(), TypeError> {
        if oid.len() != 40 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid("contains non-hex characters".into()));
        }
        Ok(())
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Oid {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}
