//! Typed KXLRC records.
//!
//! Field names match the persisted JSON array exactly. Keys this crate does not
//! know about are kept in `extra` so a load/save cycle never drops them. Numeric
//! metadata is held as [`Number`] so integers and floats are written back as read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::types::{Millis, UserId};

/// Who last edited a line and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edited {
    /// Wall-clock time of the edit, in milliseconds since the Unix epoch.
    pub timestamp: Number,
    /// Editor id.
    pub user: UserId,
}

impl Edited {
    /// Create an edit record.
    pub fn new(timestamp: i64, user: UserId) -> Self {
        Self { timestamp: Number::from(timestamp), user }
    }

    /// Edit time in whole milliseconds, if the stored number is an integer.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.timestamp.as_i64()
    }
}

impl Default for Edited {
    fn default() -> Self {
        Self::new(0, UserId::default())
    }
}

/// A free-text comment attached to a line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Comment author.
    pub user: UserId,
    /// Comment body.
    pub text: String,
}

/// One word of a lyric line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word token.
    pub text: String,
    /// When the word is sung, once stamped.
    pub timestamp: Option<Millis>,
}

impl WordEntry {
    /// Create an unstamped word.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), timestamp: None }
    }

    /// Whether the word has been stamped.
    pub const fn is_stamped(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// One line of lyrics with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricEntry {
    /// When the line starts, once stamped.
    pub timestamp: Option<Millis>,

    /// Last edit record.
    #[serde(default)]
    pub edited: Edited,

    /// Dynamic marking such as `MF`.
    #[serde(default)]
    pub voice: Option<String>,

    /// Whether the line is an instrumental passage.
    #[serde(default)]
    pub instrumental: bool,

    /// Emphasis level.
    #[serde(default)]
    pub emphasis: Option<Number>,

    /// Authors of the line.
    #[serde(default)]
    pub authors: Vec<UserId>,

    /// Reviewer comments.
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,

    /// Words of the line, in sung order.
    #[serde(rename = "text")]
    pub words: Vec<WordEntry>,

    /// Song part such as `chorus` or `verse`.
    #[serde(default)]
    pub part: Option<String>,

    /// Verse number, if any.
    #[serde(default)]
    pub verse: Option<Number>,

    /// Indices of the singers performing the line.
    #[serde(default)]
    pub singers: Option<Vec<Number>>,

    /// Unrecognised keys, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LyricEntry {
    /// Create an entry with the given words and empty metadata.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            timestamp: None,
            edited: Edited::default(),
            voice: None,
            instrumental: false,
            emphasis: None,
            authors: Vec::new(),
            comments: None,
            words: words.into_iter().map(WordEntry::new).collect(),
            part: None,
            verse: None,
            singers: None,
            extra: Map::new(),
        }
    }

    /// The line's words joined by single spaces.
    pub fn line_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the line itself has been stamped.
    pub const fn is_stamped(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Set the line timestamp and record who did it.
    pub fn stamp(&mut self, position: Millis, edited: Edited) {
        self.timestamp = Some(position);
        self.edited = edited;
    }
}
