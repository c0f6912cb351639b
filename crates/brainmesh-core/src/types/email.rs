//! Validated notification address.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `local@domain.tld`, with a two-letter minimum top-level domain.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// An email address that passed the `local@domain.tld` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an address.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if EMAIL_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::validation(format!(
                "Invalid email address '{raw}': expected the form local@domain.tld"
            )))
        }
    }

    /// The full address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed() {
        for addr in [
            "user@kumc.edu",
            "first.last@other.org",
            "a+tag@mail.example.co.uk",
            "x_y-z%1@sub-domain.io",
        ] {
            assert!(EmailAddress::parse(addr).is_ok(), "{addr} should be accepted");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for addr in [
            "",
            "userkumc.edu",
            "user@kumc",
            "user@kumc.e",
            "user@@kumc.edu",
            "us er@kumc.edu",
            "user@kumc.edu;rm",
            "user!@kumc.edu",
            "@kumc.edu",
        ] {
            assert!(EmailAddress::parse(addr).is_err(), "{addr} should be rejected");
        }
    }

    #[test]
    fn test_domain() {
        let addr = EmailAddress::parse("user@Other.Org").expect("valid");
        assert_eq!(addr.domain(), "Other.Org");
        assert_eq!(addr.as_str(), "user@Other.Org");
    }
}
