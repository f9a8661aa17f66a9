//! User interface components.
//!
//! Provides the ratatui views for playback and stamping, plus terminal setup.

mod playback;
mod stamping;
pub mod terminal;

pub use playback::{draw_playback, playback_lines, PlaybackFrame};
pub use stamping::{draw_stamping, stamping_lines};

use std::io::Write;
use std::thread;
use std::time::Duration;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

use crate::types::Millis;

/// Style for lines that are not the focus (previous and next lines).
pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the unit currently being stamped or sung.
pub fn highlight_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD)
}

/// Style for words of the current line that are not being stamped.
pub fn inactive_word_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

/// Build styled help text spans from key-description pairs for the status bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a yellow title.
pub fn create_titled_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
}

/// Format a playback position as `m:ss.mmm`.
pub fn format_position(ms: Millis) -> String {
    let ms = ms.max(0);
    format!("{}:{:02}.{:03}", ms / 60_000, (ms / 1000) % 60, ms % 1000)
}

/// Print a `Starting in N...` countdown, one line per `tick`.
pub fn countdown<W: Write>(output: &mut W, secs: u64, tick: Duration) -> std::io::Result<()> {
    for remaining in (1..=secs).rev() {
        writeln!(output, "Starting in {remaining}...")?;
        output.flush()?;
        thread::sleep(tick);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_lines() {
        let mut out = Vec::new();
        countdown(&mut out, 3, Duration::ZERO).unwrap_or_default();
        assert_eq!(
            String::from_utf8(out).unwrap_or_default(),
            "Starting in 3...\nStarting in 2...\nStarting in 1...\n"
        );
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(0), "0:00.000");
        assert_eq!(format_position(61_005), "1:01.005");
        assert_eq!(format_position(-20), "0:00.000");
    }

    #[test]
    fn test_help_text_separators() {
        let spans = create_help_text(&[("Enter", "Stamp"), ("Esc", "Quit")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " Enter: Stamp | Esc: Quit");
    }
}
