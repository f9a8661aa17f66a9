//! Plain text to KXLRC conversion.

use std::path::{Path, PathBuf};

use crate::constants::lyrics::FILE_EXTENSION;
use crate::error::{Error, Result};
use crate::lyrics::{codec, EntryTemplate, Timeline};

/// Path of a new lyrics file named `stem` inside `dir`.
pub fn output_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{FILE_EXTENSION}"))
}

/// Read a text file and build its skeleton timeline.
pub fn read_text(input: &Path, template: &EntryTemplate) -> Result<Timeline> {
    let text = fs_err::read_to_string(input).map_err(|e| Error::io(e, input.to_path_buf()))?;
    let timeline = Timeline::from_text(&text, template);
    tracing::info!("Converted {} lines from {}", timeline.len(), input.display());
    Ok(timeline)
}

/// Convert the text file at `input` and save the result to `output`.
pub fn convert_file(input: &Path, output: &Path, template: &EntryTemplate) -> Result<Timeline> {
    let timeline = read_text(input, template)?;
    codec::save(output, &timeline)?;
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_output_path_adds_extension() {
        assert_eq!(output_path(Path::new("out"), "song"), PathBuf::from("out/song.json"));
    }

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lyrics.txt");
        fs_err::write(&input, "hello world\n\nfoo\n").unwrap();

        let output = output_path(dir.path(), "result");
        let timeline = convert_file(&input, &output, &EntryTemplate::default()).unwrap();

        assert_eq!(timeline.len(), 2);
        assert_eq!(codec::load(&output).unwrap(), timeline);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_text(&dir.path().join("absent.txt"), &EntryTemplate::default());
        assert!(matches!(result, Err(Error::Io { path: Some(_), .. })));
    }
}
