//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::lyrics::{DEFAULT_PART, DEFAULT_VOICE};
use crate::constants::playback::{
    DEFAULT_COUNTDOWN_SECS, DEFAULT_FADE_IN_MS, DEFAULT_FADE_OUT_MS, DEFAULT_POLL_MS,
};
use crate::error::Result;
use crate::lyrics::EntryTemplate;
use crate::types::UserId;

/// Configuration for the KXLRC tools.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Id recorded as author and editor
    pub user: UserId,
    /// Directory for newly named output files
    pub output_dir: PathBuf,
    /// Interval between lyric lookups while playing
    pub poll_interval: Duration,
    /// Countdown before playback starts, in seconds
    pub countdown_secs: u64,
    /// Fade-in applied when playback starts
    pub fade_in: Duration,
    /// Fade-out applied when playback stops
    pub fade_out: Duration,
    /// Song part given to converted lines
    pub default_part: String,
    /// Dynamic marking given to converted lines
    pub default_voice: String,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Metadata template for entries built by the converter.
    pub fn entry_template(&self) -> EntryTemplate {
        EntryTemplate {
            author: self.user.clone(),
            voice: Some(self.default_voice.clone()),
            part: Some(self.default_part.clone()),
            ..EntryTemplate::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: UserId::nil(),
            output_dir: PathBuf::from("."),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            fade_in: Duration::from_millis(DEFAULT_FADE_IN_MS),
            fade_out: Duration::from_millis(DEFAULT_FADE_OUT_MS),
            default_part: DEFAULT_PART.to_string(),
            default_voice: DEFAULT_VOICE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok());
        tracing::info!(
            "{} {} starting as user {}",
            config.app_name(),
            config.app_version(),
            config.user.as_str()
        );
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(user) = lookup("KXLRC_USER").filter(|u| !u.trim().is_empty()) {
            config.user = UserId::new(user.trim());
        }

        if let Some(dir) = lookup("KXLRC_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(shellexpand::tilde(&dir).to_string());
        }

        if let Some(ms) = parse_var::<u64>(&lookup, "KXLRC_POLL_MS") {
            config.poll_interval = Duration::from_millis(ms.max(1));
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "KXLRC_COUNTDOWN") {
            config.countdown_secs = secs;
        }

        if let Some(ms) = parse_var::<u64>(&lookup, "KXLRC_FADE_IN_MS") {
            config.fade_in = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_var::<u64>(&lookup, "KXLRC_FADE_OUT_MS") {
            config.fade_out = Duration::from_millis(ms);
        }

        if let Some(part) = lookup("KXLRC_PART") {
            config.default_part = part;
        }

        if let Some(voice) = lookup("KXLRC_VOICE") {
            config.default_voice = voice;
        }

        config
    }
}

/// Parse a numeric variable, ignoring (and logging) values that do not parse.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        tracing::warn!("Ignoring {key}={raw:?}: not a valid number");
    }
    parsed
}
