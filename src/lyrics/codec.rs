//! Codecs for KXLRC lyric arrays.
//!
//! Two encodings share the same serde model: indented JSON for files people edit,
//! and MessagePack for the packed `.kxlrc` form. Files are read and written whole;
//! [`load`] and [`save`] pick the encoding from the file extension.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::constants::lyrics::PACKED_EXTENSION;
use crate::error::{Error, Result};
use crate::lyrics::timeline::Timeline;

const INDENT: &[u8] = b"    ";

/// On-disk encoding of a lyric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Indented JSON text.
    Json,
    /// MessagePack with named fields.
    Packed,
}

impl Format {
    /// Choose the encoding for `path`: `.kxlrc` is packed, anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(PACKED_EXTENSION) => Self::Packed,
            _ => Self::Json,
        }
    }
}

/// Parse a timeline from JSON text.
pub fn from_str(json: &str) -> Result<Timeline> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a timeline to indented JSON text.
pub fn to_string(timeline: &Timeline) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    timeline.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::Msg(format!("Serialized lyrics are not UTF-8: {e}")))
}

/// Encode a timeline as MessagePack.
///
/// Records are written as maps keyed by field name, so other readers of the
/// packed format see the same keys as in the JSON form.
pub fn pack(timeline: &Timeline) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(timeline)?)
}

/// Decode a timeline from MessagePack bytes.
pub fn unpack(bytes: &[u8]) -> Result<Timeline> {
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Load a timeline from a lyrics file.
pub fn load(path: &Path) -> Result<Timeline> {
    let format = Format::from_path(path);
    let timeline: Timeline = match format {
        Format::Json => {
            let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
            serde_json::from_str(&text).map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?
        }
        Format::Packed => {
            let bytes = fs_err::read(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
            rmp_serde::from_slice(&bytes)
                .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?
        }
    };

    tracing::info!("Loaded {} lyric lines from {} ({format:?})", timeline.len(), path.display());
    Ok(timeline)
}

/// Write a timeline to a lyrics file, replacing any existing content.
pub fn save(path: &Path, timeline: &Timeline) -> Result<()> {
    let format = Format::from_path(path);
    let bytes = match format {
        Format::Json => to_string(timeline)?.into_bytes(),
        Format::Packed => pack(timeline)?,
    };
    fs_err::write(path, bytes).map_err(|e| Error::io(e, path.to_path_buf()))?;

    tracing::info!("Saved {} lyric lines to {} ({format:?})", timeline.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lyrics::timeline::EntryTemplate;
    use crate::lyrics::LyricEntry;
    use crate::stamping::{StampMode, StampSession};
    use crate::types::UserId;

    fn stamped_timeline() -> Timeline {
        let timeline = Timeline::from_text("one two\nthree", &EntryTemplate::default());
        let mut session = StampSession::new(timeline, StampMode::WordAndLine, UserId::new("ed"));
        for position in [100, 150, 400] {
            session.advance(position, 1_700_000_000_000);
        }
        session.into_timeline()
    }

    #[test]
    fn test_round_trip_text_built_timeline() {
        let timeline = Timeline::from_text("one two\nthree", &EntryTemplate::default());
        let json = to_string(&timeline).unwrap();
        assert_eq!(from_str(&json).unwrap(), timeline);
    }

    #[test]
    fn test_output_uses_four_space_indent() {
        let timeline = Timeline::from_text("x", &EntryTemplate::default());
        let json = to_string(&timeline).unwrap();
        assert!(json.starts_with("[\n    {\n        \"timestamp\": null"));
    }

    #[test]
    fn test_empty_array() {
        let timeline = from_str("[]").unwrap();
        assert!(timeline.is_empty());
        assert_eq!(to_string(&timeline).unwrap(), "[]");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(from_str("{\"not\": \"an array\"}"), Err(Error::Parse { .. })));
        assert!(matches!(from_str("invalid"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error_with_path() {
        let path = Path::new("/tmp/kxlrc_missing_lyrics_file_for_test.json");
        match load(path) {
            Err(Error::Io { path: Some(p), .. }) => assert_eq!(p, path),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let timeline = stamped_timeline();
        let bytes = pack(&timeline).unwrap();
        assert_eq!(unpack(&bytes).unwrap(), timeline);
    }

    #[test]
    fn test_pack_keeps_unknown_keys_and_fractions() {
        let json = r#"[{ "timestamp": 5, "text": [], "emphasis": 0.5, "mood": "calm" }]"#;
        let timeline = from_str(json).unwrap();

        let back = unpack(&pack(&timeline).unwrap()).unwrap();
        let entry: &LyricEntry = back.get(0).unwrap();
        assert_eq!(entry.emphasis.as_ref().and_then(serde_json::Number::as_f64), Some(0.5));
        assert_eq!(entry.extra.get("mood"), Some(&serde_json::Value::from("calm")));
    }

    #[test]
    fn test_unpack_garbage_is_parse_error() {
        assert!(matches!(unpack(&[0xc1]), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("song.kxlrc")), Format::Packed);
        assert_eq!(Format::from_path(Path::new("song.KXLRC")), Format::Packed);
        assert_eq!(Format::from_path(Path::new("song.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("song")), Format::Json);
    }
}
