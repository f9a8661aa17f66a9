//! KXLRC lyric data: typed records, the timeline, and the JSON codec.

pub mod codec;
pub mod model;
pub mod timeline;

pub use model::{Comment, Edited, LyricEntry, WordEntry};
pub use timeline::{EntryTemplate, Timeline};
