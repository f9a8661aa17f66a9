//! Core type definitions for compile-time safety.
//!
//! This module provides newtype wrappers around identifiers and time values so
//! playback positions, wall-clock times, and user ids cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::lyrics::NIL_USER;

/// Milliseconds from the start of playback.
pub type Millis = i64;

/// Identifier of a lyric author or editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new `UserId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The placeholder id written when no editor is configured.
    pub fn nil() -> Self {
        Self(NIL_USER.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of wall-clock time for edit records.
pub trait Clock {
    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&UserId::new("abc")).unwrap_or_default();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn nil_user_is_twenty_zeros() {
        let nil = UserId::default();
        assert_eq!(nil.as_str().len(), 20);
        assert!(nil.as_str().chars().all(|c| c == '0'));
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
