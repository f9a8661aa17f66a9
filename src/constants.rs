//! Application constants.
//!
//! Centralizes magic numbers and default values for better maintainability.

/// Lyric file defaults.
pub mod lyrics {
    /// Placeholder user id for authors and editors.
    pub const NIL_USER: &str = "00000000000000000000";

    /// Edit time written into freshly converted entries.
    pub const CONVERTED_EDIT_TIME: i64 = 1_700_352_778_771;

    /// Default dynamic marking for converted lines.
    pub const DEFAULT_VOICE: &str = "MF";

    /// Default emphasis for converted lines.
    pub const DEFAULT_EMPHASIS: i64 = 1;

    /// Default song part for converted lines.
    pub const DEFAULT_PART: &str = "chorus";

    /// File extension for saved lyric arrays.
    pub const FILE_EXTENSION: &str = "json";

    /// File extension for MessagePack-packed lyric arrays.
    pub const PACKED_EXTENSION: &str = "kxlrc";

    /// File stem used when the user accepts the default name.
    pub const DEFAULT_FILE_STEM: &str = "convert_result";
}

/// Playback and stamping timing.
pub mod playback {
    /// Interval between lyric lookups while playing, in milliseconds.
    pub const DEFAULT_POLL_MS: u64 = 100;

    /// Seconds counted down before audio starts.
    pub const DEFAULT_COUNTDOWN_SECS: u64 = 3;

    /// Fade-in applied when playback starts, in milliseconds.
    pub const DEFAULT_FADE_IN_MS: u64 = 1000;

    /// Fade-out applied when playback stops, in milliseconds.
    pub const DEFAULT_FADE_OUT_MS: u64 = 1000;

    /// Number of volume steps in a fade-out ramp.
    pub const FADE_STEPS: u32 = 20;
}

/// Logging.
pub mod logging {
    /// Directory name under the platform data directory.
    pub const APP_DIR: &str = "kxlrc";

    /// Log file name.
    pub const LOG_FILE: &str = "kxlrc.log";
}
