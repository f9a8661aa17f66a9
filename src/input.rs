//! Input handling abstractions.
//!
//! Line prompts for the interactive questions the tools ask, and a key-press
//! source that turns terminal events into advance signals. Both are generic over
//! their input so they can be tested without a terminal.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::lyrics::DEFAULT_FILE_STEM;
use crate::error::{Error, Result};

/// Signal produced by a key press during playback or stamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceSignal {
    /// Commit the current stamp and move on.
    Advance,
    /// Stop the session.
    Abort,
}

impl AdvanceSignal {
    /// Map a key event to a signal. Keys without a meaning return `None`.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Enter => Some(Self::Advance),
            KeyCode::Esc | KeyCode::Char('q') => Some(Self::Abort),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Source of advance signals.
pub trait SignalSource {
    /// Block until the next signal.
    fn wait(&mut self) -> Result<AdvanceSignal>;

    /// Wait at most `timeout` for a signal.
    fn poll(&mut self, timeout: Duration) -> Result<Option<AdvanceSignal>>;
}

/// Signals read from terminal key presses. The terminal must be in raw mode.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl SignalSource for TerminalKeys {
    fn wait(&mut self) -> Result<AdvanceSignal> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(signal) = AdvanceSignal::from_key(key) {
                    return Ok(signal);
                }
            }
        }
    }

    fn poll(&mut self, timeout: Duration) -> Result<Option<AdvanceSignal>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AdvanceSignal::from_key(key));
            }
        }
        Ok(None)
    }
}

/// Print `message` and read one line, without its line ending.
///
/// End of input aborts the session.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Aborted);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Turn a typed path into a `PathBuf`, expanding a leading `~`.
pub fn expand_path(answer: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(answer.trim()).to_string())
}

/// Ask for an output file stem.
///
/// An empty answer asks whether to use the default name; declining asks again.
pub fn prompt_file_stem<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    let mut stem = prompt(input, output, "Enter filename: ")?;
    while stem.trim().is_empty() {
        if prompt(input, output, "Override? (y/n): ")?.trim() == "y" {
            stem = DEFAULT_FILE_STEM.to_string();
        } else {
            stem = prompt(input, output, "Enter filename: ")?;
        }
    }
    Ok(stem.trim().to_string())
}

/// How the stamper should save its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    /// Replace the lyrics file that was loaded.
    Overwrite,
    /// Write to a newly named file.
    NewFile,
}

impl SaveChoice {
    /// `1` overwrites; any other answer saves to a new file.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim() == "1" {
            Self::Overwrite
        } else {
            Self::NewFile
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Cursor;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_enter_advances() {
        assert_eq!(AdvanceSignal::from_key(make_key(KeyCode::Enter)), Some(AdvanceSignal::Advance));
    }

    #[test]
    fn test_abort_keys() {
        assert_eq!(AdvanceSignal::from_key(make_key(KeyCode::Esc)), Some(AdvanceSignal::Abort));
        assert_eq!(AdvanceSignal::from_key(make_key(KeyCode::Char('q'))), Some(AdvanceSignal::Abort));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(AdvanceSignal::from_key(ctrl_c), Some(AdvanceSignal::Abort));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(AdvanceSignal::from_key(make_key(KeyCode::Char('c'))), None);
        assert_eq!(AdvanceSignal::from_key(make_key(KeyCode::Char(' '))), None);

        let mut release = make_key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(AdvanceSignal::from_key(release), None);
    }

    #[test]
    fn test_prompt_strips_line_ending() {
        let mut input = Cursor::new("lyrics.txt\r\n");
        let mut output = Vec::new();
        let answer = prompt(&mut input, &mut output, "Enter file path: ").unwrap();

        assert_eq!(answer, "lyrics.txt");
        assert_eq!(String::from_utf8(output).unwrap(), "Enter file path: ");
    }

    #[test]
    fn test_prompt_eof_aborts() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(matches!(prompt(&mut input, &mut output, "> "), Err(Error::Aborted)));
    }

    #[test]
    fn test_file_stem_direct() {
        let mut input = Cursor::new("song\n");
        let stem = prompt_file_stem(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(stem, "song");
    }

    #[test]
    fn test_file_stem_empty_then_default() {
        let mut input = Cursor::new("\ny\n");
        let stem = prompt_file_stem(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(stem, DEFAULT_FILE_STEM);
    }

    #[test]
    fn test_file_stem_empty_declined_then_named() {
        let mut input = Cursor::new("\nn\nmine\n");
        let stem = prompt_file_stem(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(stem, "mine");
    }

    #[test]
    fn test_expand_path_trims() {
        assert_eq!(expand_path("  song.json "), PathBuf::from("song.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/a.txt"), home.join("a.txt"));
        }
    }

    #[test]
    fn test_save_choice() {
        assert_eq!(SaveChoice::from_answer("1"), SaveChoice::Overwrite);
        assert_eq!(SaveChoice::from_answer("2"), SaveChoice::NewFile);
        assert_eq!(SaveChoice::from_answer(""), SaveChoice::NewFile);
    }
}
