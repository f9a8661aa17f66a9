//! Incremental stamping of lines and words during playback.
//!
//! A [`StampSession`] owns the timeline being authored and tracks which unit is
//! next. Every call to [`StampSession::advance`] stamps exactly one unit with the
//! supplied playback position and moves on. There is no undo; re-running the
//! session is the only way to correct a stamp.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::lyrics::{Edited, LyricEntry, Timeline};
use crate::types::{Millis, UserId};

/// What a stamping session assigns timestamps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampMode {
    /// Stamp whole lines.
    Line,
    /// Stamp every word; line timestamps are left alone.
    Word,
    /// Stamp every word and give each line its first word's stamp.
    WordAndLine,
}

impl StampMode {
    /// Returns all modes in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Line, Self::Word, Self::WordAndLine]
    }

    /// Menu selector for this mode.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Line => "1",
            Self::Word => "2",
            Self::WordAndLine => "3",
        }
    }

    /// Menu description for this mode.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Line => "Timestamp lines (when a line is sung)",
            Self::Word => "Timestamp words (when a word is sung)",
            Self::WordAndLine => {
                "Timestamp lines and words (line takes the time of its first word)"
            }
        }
    }

    /// Instruction shown above the lyrics while stamping.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Line => "Press enter when the line is sung...",
            Self::Word | Self::WordAndLine => "Press enter when the word is sung...",
        }
    }

    /// Whether the mode stamps individual words.
    #[must_use]
    pub const fn stamps_words(self) -> bool {
        !matches!(self, Self::Line)
    }
}

impl fmt::Display for StampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Word => "word",
            Self::WordAndLine => "word-and-line",
        };
        write!(f, "{name}")
    }
}

impl FromStr for StampMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "line" => Ok(Self::Line),
            "2" | "word" => Ok(Self::Word),
            "3" | "word-and-line" => Ok(Self::WordAndLine),
            other => Err(Error::config(
                format!("Unknown stamping mode '{other}'"),
                "Enter 1 (lines), 2 (words) or 3 (lines and words)",
            )),
        }
    }
}

/// Result of one advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampOutcome {
    /// A line was stamped.
    Line {
        /// Index of the stamped line.
        line: usize,
    },
    /// A word was stamped.
    Word {
        /// Index of the line holding the word.
        line: usize,
        /// Index of the word within the line.
        word: usize,
    },
    /// Nothing left to stamp.
    Finished,
}

/// What the renderer needs to show the current stamping position.
#[derive(Debug, Clone, Copy)]
pub struct StampView<'a> {
    /// Active mode.
    pub mode: StampMode,
    /// Line before the current one.
    pub previous: Option<&'a LyricEntry>,
    /// Line being stamped.
    pub current: Option<&'a LyricEntry>,
    /// Line after the current one.
    pub next: Option<&'a LyricEntry>,
    /// Word being stamped, in word modes.
    pub word_index: Option<usize>,
    /// Units stamped so far.
    pub done: usize,
    /// Units to stamp in total.
    pub total: usize,
}

/// A stamping pass over a timeline.
#[derive(Debug, Clone)]
pub struct StampSession {
    timeline: Timeline,
    mode: StampMode,
    editor: UserId,
    line: usize,
    word: usize,
    done: usize,
    total: usize,
}

impl StampSession {
    /// Start a session at the first unit of `timeline`.
    pub fn new(timeline: Timeline, mode: StampMode, editor: UserId) -> Self {
        let total = if mode.stamps_words() { timeline.word_count() } else { timeline.len() };
        let mut session = Self { timeline, mode, editor, line: 0, word: 0, done: 0, total };
        session.skip_wordless_lines();
        session
    }

    /// The session's mode.
    pub const fn mode(&self) -> StampMode {
        self.mode
    }

    /// The timeline as stamped so far.
    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Whether every unit has been stamped.
    pub fn is_finished(&self) -> bool {
        self.line >= self.timeline.len()
    }

    /// Units stamped so far and in total.
    pub const fn progress(&self) -> (usize, usize) {
        (self.done, self.total)
    }

    /// Index of the line being stamped.
    pub fn current_line(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.line)
    }

    /// Index of the word being stamped, in word modes.
    pub fn current_word(&self) -> Option<usize> {
        (self.mode.stamps_words() && !self.is_finished()).then_some(self.word)
    }

    /// Stamp the current unit at `position` and move to the next one.
    ///
    /// `edited_at` is the wall-clock time recorded on stamped lines.
    pub fn advance(&mut self, position: Millis, edited_at: i64) -> StampOutcome {
        if self.is_finished() {
            return StampOutcome::Finished;
        }

        let line = self.line;
        let edited = Edited::new(edited_at, self.editor.clone());
        let entry = &mut self.timeline.entries_mut()[line];

        let outcome = match self.mode {
            StampMode::Line => {
                entry.stamp(position, edited);
                self.line += 1;
                StampOutcome::Line { line }
            }
            StampMode::Word | StampMode::WordAndLine => {
                let word = self.word;
                if self.mode == StampMode::WordAndLine && word == 0 {
                    entry.stamp(position, edited);
                }
                entry.words[word].timestamp = Some(position);

                self.word += 1;
                if self.word >= entry.words.len() {
                    self.line += 1;
                    self.word = 0;
                    self.skip_wordless_lines();
                }
                StampOutcome::Word { line, word }
            }
        };

        self.done += 1;
        tracing::debug!(?outcome, position, "stamped");
        outcome
    }

    /// Renderer view of the current position.
    pub fn view(&self) -> StampView<'_> {
        let (previous, next) = self.timeline.neighbors(self.line);
        StampView {
            mode: self.mode,
            previous,
            current: self.timeline.get(self.line),
            next: if self.is_finished() { None } else { next },
            word_index: self.current_word(),
            done: self.done,
            total: self.total,
        }
    }

    /// Finish the session, returning the stamped timeline.
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    fn skip_wordless_lines(&mut self) {
        if !self.mode.stamps_words() {
            return;
        }
        while self.timeline.get(self.line).is_some_and(|e| e.words.is_empty()) {
            self.line += 1;
        }
    }
}
