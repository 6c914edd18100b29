//! Strongly-typed, case-insensitive identifiers used across the domain.
//!
//! Identifiers keep their original casing for display, but compare, hash and
//! order on a normalized (trimmed, lower-cased) key. Storage layers can key
//! their maps directly on these types without scattering case folding around.

use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a user (stable, unique, case-insensitive).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId {
    display: String,
    key: String,
}

/// Name of a role (unique within the catalog, case-insensitive).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName {
    display: String,
    key: String,
}

macro_rules! impl_ci_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Parse an identifier, rejecting empty or whitespace-only input.
            pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_argument(concat!(
                        $name,
                        " cannot be empty"
                    )));
                }
                Ok(Self::from_trimmed(trimmed))
            }

            /// Build from input already known to be trimmed and non-blank.
            fn from_trimmed(trimmed: &str) -> Self {
                Self {
                    display: trimmed.to_string(),
                    key: trimmed.to_lowercase(),
                }
            }

            /// Original casing, as supplied by the caller.
            pub fn as_str(&self) -> &str {
                &self.display
            }

            /// Normalized comparison key.
            pub fn key(&self) -> &str {
                &self.key
            }

            /// Case-insensitive comparison against a raw string.
            pub fn matches(&self, other: &str) -> bool {
                self.key == other.trim().to_lowercase()
            }
        }

        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }

        impl Eq for $t {}

        impl Hash for $t {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.key.hash(state);
            }
        }

        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $t {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.key.cmp(&other.key)
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.display)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $t {
            type Error = DomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.display
            }
        }
    };
}

impl_ci_newtype!(UserId, "user id");
impl_ci_newtype!(RoleName, "role name");

impl RoleName {
    /// Name of the administrator role when nothing else is configured.
    pub const DEFAULT_ADMIN: &'static str = "Admin";

    pub fn default_admin() -> Self {
        Self::from_trimmed(Self::DEFAULT_ADMIN)
    }
}
