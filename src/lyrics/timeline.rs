//! The lyric timeline: an ordered sequence of lines.
//!
//! Provides construction from plain text, the nearest-preceding-timestamp lookup
//! used during playback, and the small set of editing operations the tools need.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::constants::lyrics::{
    CONVERTED_EDIT_TIME, DEFAULT_EMPHASIS, DEFAULT_PART, DEFAULT_VOICE,
};
use crate::lyrics::model::{Comment, Edited, LyricEntry};
use crate::types::{Millis, UserId};

/// Metadata stamped onto every entry built from plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTemplate {
    /// Author and editor of the new lines.
    pub author: UserId,
    /// Edit time recorded on the new lines.
    pub edited_at: i64,
    /// Dynamic marking.
    pub voice: Option<String>,
    /// Emphasis level.
    pub emphasis: Option<Number>,
    /// Song part.
    pub part: Option<String>,
    /// Verse number.
    pub verse: Option<Number>,
    /// Singer indices.
    pub singers: Option<Vec<Number>>,
    /// Instrumental flag.
    pub instrumental: bool,
}

impl Default for EntryTemplate {
    fn default() -> Self {
        Self {
            author: UserId::nil(),
            edited_at: CONVERTED_EDIT_TIME,
            voice: Some(DEFAULT_VOICE.to_string()),
            emphasis: Some(Number::from(DEFAULT_EMPHASIS)),
            part: Some(DEFAULT_PART.to_string()),
            verse: None,
            singers: Some(vec![Number::from(0)]),
            instrumental: false,
        }
    }
}

impl EntryTemplate {
    /// Build an unstamped entry from a line's tokens.
    pub fn entry<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> LyricEntry {
        let mut entry = LyricEntry::from_words(tokens);
        entry.edited = Edited::new(self.edited_at, self.author.clone());
        entry.voice.clone_from(&self.voice);
        entry.instrumental = self.instrumental;
        entry.emphasis.clone_from(&self.emphasis);
        entry.authors = vec![self.author.clone()];
        entry.comments = Some(vec![Comment { user: self.author.clone(), text: String::new() }]);
        entry.part.clone_from(&self.part);
        entry.verse.clone_from(&self.verse);
        entry.singers.clone_from(&self.singers);
        entry
    }
}

/// Rounded-up midpoint of two timestamps, exact over the whole `i64` range.
fn ceil_midpoint(a: Millis, b: Millis) -> Millis {
    let mid = (i128::from(a) + i128::from(b) + 1).div_euclid(2);
    i64::try_from(mid).unwrap_or(b)
}

/// Ordered sequence of lyric lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<LyricEntry>,
}

impl Timeline {
    /// Create an empty timeline.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Build a timeline from raw text, one entry per non-empty line.
    ///
    /// Each whitespace-separated token becomes one word. Lines with no tokens are
    /// dropped. All timestamps are left unset.
    pub fn from_text(text: &str, template: &EntryTemplate) -> Self {
        let entries = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(|line| template.entry(line.split_whitespace()))
            .collect();
        Self { entries }
    }

    /// All entries in sequence order.
    pub fn entries(&self) -> &[LyricEntry] {
        &self.entries
    }

    /// Mutable access to the entries.
    pub fn entries_mut(&mut self) -> &mut [LyricEntry] {
        &mut self.entries
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&LyricEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, LyricEntry> {
        self.entries.iter()
    }

    /// Total number of words across all entries.
    pub fn word_count(&self) -> usize {
        self.entries.iter().map(|e| e.words.len()).sum()
    }

    /// The entries immediately before and after `index`.
    pub fn neighbors(&self, index: usize) -> (Option<&LyricEntry>, Option<&LyricEntry>) {
        let previous = index.checked_sub(1).and_then(|i| self.entries.get(i));
        let next = index.checked_add(1).and_then(|i| self.entries.get(i));
        (previous, next)
    }

    /// Find the entry with the greatest timestamp not after `time`.
    ///
    /// Entries must be sorted by timestamp. Returns `None` for an empty timeline or
    /// when `time` precedes the first entry. When several entries share the queried
    /// timestamp, the one the search lands on first is returned, which is not
    /// necessarily the earliest.
    pub fn lookup(&self, time: Millis) -> Option<&LyricEntry> {
        self.lookup_index(time).and_then(|i| self.entries.get(i))
    }

    /// Index form of [`Timeline::lookup`].
    pub fn lookup_index(&self, time: Millis) -> Option<usize> {
        let target = Some(time);
        let mut low = 0usize;
        // One past the last index still in range.
        let mut high = self.entries.len();

        while low < high {
            let mid = (low + high - 1) / 2;
            let mid_time = self.entries[mid].timestamp;

            match mid_time.cmp(&target) {
                std::cmp::Ordering::Equal => return Some(mid),
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid,
            }
        }

        high.checked_sub(1)
    }

    /// Whether every entry is stamped and timestamps never decrease.
    pub fn is_sorted_by_timestamp(&self) -> bool {
        self.entries.iter().all(LyricEntry::is_stamped)
            && self.entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
    }

    /// A copy holding only the stamped entries, in sequence order.
    pub fn stamped(&self) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| e.is_stamped()).cloned().collect(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: LyricEntry) {
        self.entries.push(entry);
    }

    /// Insert an entry at `index`, appending when `index` is past the end.
    ///
    /// With `fill_timestamp`, an entry placed between two stamped neighbours gets
    /// the rounded-up midpoint of their timestamps.
    pub fn insert(&mut self, index: usize, mut entry: LyricEntry, fill_timestamp: bool) {
        let index = index.min(self.entries.len());

        if fill_timestamp {
            let previous = index.checked_sub(1).and_then(|i| self.entries.get(i));
            let next = self.entries.get(index);
            if let (Some(a), Some(b)) = (
                previous.and_then(|e| e.timestamp),
                next.and_then(|e| e.timestamp),
            ) {
                entry.timestamp = Some(ceil_midpoint(a, b));
            }
        }

        self.entries.insert(index, entry);
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<LyricEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Consume the timeline, returning its entries.
    pub fn into_entries(self) -> Vec<LyricEntry> {
        self.entries
    }
}

impl From<Vec<LyricEntry>> for Timeline {
    fn from(entries: Vec<LyricEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a LyricEntry;
    type IntoIter = std::slice::Iter<'a, LyricEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
