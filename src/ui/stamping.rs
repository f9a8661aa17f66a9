use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::stamping::StampView;
use crate::ui::{
    create_help_text, create_titled_block, dim_style, highlight_style, inactive_word_style,
};

/// Lines shown while stamping: instruction, previous, current, next.
pub fn stamping_lines(view: &StampView<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(view.mode.instruction(), dim_style())),
        Line::default(),
    ];

    lines.push(match view.previous {
        Some(entry) => Line::from(Span::styled(entry.line_text(), dim_style())),
        None => Line::from(Span::styled("...", dim_style())),
    });

    lines.push(match (view.current, view.word_index) {
        (Some(entry), Some(active)) => {
            let mut spans = Vec::with_capacity(entry.words.len() * 2);
            for (i, word) in entry.words.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                let style = if i == active { highlight_style() } else { inactive_word_style() };
                spans.push(Span::styled(word.text.clone(), style));
            }
            Line::from(spans)
        }
        (Some(entry), None) => Line::from(Span::styled(entry.line_text(), highlight_style())),
        (None, _) => Line::from(Span::styled("Done", Style::default().fg(Color::Green))),
    });

    lines.push(match view.next {
        Some(entry) => Line::from(Span::styled(entry.line_text(), dim_style())),
        None => Line::from("End"),
    });

    lines
}

/// Render the stamping view.
pub fn draw_stamping(f: &mut Frame, view: &StampView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(f.size());

    let title = format!("KXLRC Stamper ({} mode)", view.mode);
    f.render_widget(
        Paragraph::new(stamping_lines(view))
            .block(create_titled_block(&title))
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    let mut status = create_help_text(&[("Enter", "Stamp"), ("Esc", "Abort")]);
    status.push(Span::styled(
        format!(" | {}/{} stamped", view.done, view.total),
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
    use crate::lyrics::{EntryTemplate, Timeline};
    use crate::stamping::{StampMode, StampSession};
    use crate::types::UserId;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn session(mode: StampMode) -> StampSession {
        let timeline = Timeline::from_text("one two\nthree", &EntryTemplate::default());
        StampSession::new(timeline, mode, UserId::nil())
    }

    #[test]
    fn test_line_mode_layout() {
        let s = session(StampMode::Line);
        let lines = stamping_lines(&s.view());

        assert_eq!(text(&lines[0]), "Press enter when the line is sung...");
        assert_eq!(text(&lines[2]), "...");
        assert_eq!(text(&lines[3]), "one two");
        assert_eq!(text(&lines[4]), "three");
    }

    #[test]
    fn test_word_mode_highlights_active_word() {
        let mut s = session(StampMode::Word);
        s.advance(10, 0);
        let lines = stamping_lines(&s.view());

        let current = &lines[3];
        assert_eq!(text(current), "one two");
        assert_eq!(current.spans[0].style, inactive_word_style());
        assert_eq!(current.spans[2].style, highlight_style());
    }

    #[test]
    fn test_last_line_shows_end() {
        let mut s = session(StampMode::Line);
        s.advance(10, 0);
        let lines = stamping_lines(&s.view());
        assert_eq!(text(&lines[2]), "one two");
        assert_eq!(text(&lines[4]), "End");
    }
}
