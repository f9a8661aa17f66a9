use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::lyrics::LyricEntry;
use crate::types::Millis;
use crate::ui::{create_help_text, create_titled_block, dim_style, format_position, highlight_style};

/// Everything the playback view shows for one tick.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackFrame<'a> {
    /// Line being sung, if playback has reached the first line.
    pub current: Option<&'a LyricEntry>,
    /// Line that follows.
    pub next: Option<&'a LyricEntry>,
    /// Playback position.
    pub position: Millis,
}

/// Lines of lyric text for the playback view.
pub fn playback_lines(frame: &PlaybackFrame<'_>) -> Vec<Line<'static>> {
    let current = frame.current.map_or_else(
        || Line::from(Span::styled("...", dim_style())),
        |entry| Line::from(Span::styled(entry.line_text(), highlight_style())),
    );
    let next = frame
        .next
        .map_or_else(Line::default, |entry| Line::from(Span::styled(entry.line_text(), dim_style())));

    vec![current, Line::default(), next]
}

/// Render the playback view.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_playback(f: &mut Frame, frame: &PlaybackFrame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.size());

    let block = create_titled_block("KXLRC Player");
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    let lines = playback_lines(frame);
    let pad = inner.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(pad), Constraint::Min(1)])
        .split(inner)[1];

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        text_area,
    );

    let mut status = create_help_text(&[("Esc", "Stop")]);
    status.push(Span::styled(
        format!(" | {}", format_position(frame.position)),
        Style::default().fg(Color::Gray),
    ));
    f.render_widget(
        Paragraph::new(Line::from(status)).block(create_titled_block("Status")),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_before_first_line_shows_ellipsis() {
        let next = LyricEntry::from_words(["first", "line"]);
        let lines = playback_lines(&PlaybackFrame { current: None, next: Some(&next), position: 0 });
        assert_eq!(text(&lines[0]), "...");
        assert_eq!(text(&lines[2]), "first line");
    }

    #[test]
    fn test_current_line_is_highlighted() {
        let current = LyricEntry::from_words(["sing"]);
        let lines = playback_lines(&PlaybackFrame { current: Some(&current), next: None, position: 10 });
        assert_eq!(text(&lines[0]), "sing");
        assert_eq!(lines[0].spans[0].style, highlight_style());
        assert_eq!(text(&lines[2]), "");
    }
}
