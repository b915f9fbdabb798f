//! Secret string wrapper for platform credentials.
//!
//! [`SecretString`] holds the platform API key so that it never shows up in
//! logs, `Debug` output, or the `relay config show` dump.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string value that must not appear in logs, Debug output, or serialized JSON.
///
/// - `Debug` and `Display` print `[REDACTED]` (or nothing if empty)
/// - `Serialize` always emits an empty string
/// - `Deserialize` accepts a plain string
/// - [`expose()`](SecretString::expose) returns the inner value
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read a secret from the named environment variable.
    ///
    /// Returns `None` when the variable is unset or empty.
    pub fn from_env(var: &str) -> Option<Self> {
        match std::env::var(var) {
            Ok(v) if !v.is_empty() => Some(Self(v)),
            _ => None,
        }
    }

    /// The actual secret. Only call this where the value is sent on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the wrapped value is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "\"\"")
        } else {
            write!(f, "\"[REDACTED]\"")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "[REDACTED]")
        }
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_redact() {
        let s = SecretString::new("arc_live_key");
        assert_eq!(format!("{s:?}"), "\"[REDACTED]\"");
        assert_eq!(format!("{s}"), "[REDACTED]");
    }

    #[test]
    fn empty_secret_prints_nothing() {
        let s = SecretString::default();
        assert_eq!(format!("{s:?}"), "\"\"");
        assert_eq!(format!("{s}"), "");
        assert!(s.is_empty());
    }

    #[test]
    fn serialize_never_leaks() {
        let s = SecretString::new("arc_live_key");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn deserialize_accepts_plain_string() {
        let s: SecretString = serde_json::from_str("\"arc_live_key\"").unwrap();
        assert_eq!(s.expose(), "arc_live_key");
    }

    #[test]
    fn from_env_reads_variable() {
        temp_env::with_var("TOOLRELAY_TEST_SECRET", Some("from-env"), || {
            let s = SecretString::from_env("TOOLRELAY_TEST_SECRET").unwrap();
            assert_eq!(s.expose(), "from-env");
        });
    }

    #[test]
    fn from_env_treats_empty_as_unset() {
        temp_env::with_var("TOOLRELAY_TEST_SECRET_EMPTY", Some(""), || {
            assert!(SecretString::from_env("TOOLRELAY_TEST_SECRET_EMPTY").is_none());
        });
        temp_env::with_var_unset("TOOLRELAY_TEST_SECRET_UNSET", || {
            assert!(SecretString::from_env("TOOLRELAY_TEST_SECRET_UNSET").is_none());
        });
    }
}
