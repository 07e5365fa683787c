//! Shared styling for prompt lines.
//!
//! Every prompt starts with the same header (`? Label `) and ends by
//! replacing itself with a one-line summary (`? Label answer`).

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const PRIMARY: Color = Color::LightBlue;

/// Marker printed in place of an answer when the prompt is cancelled.
pub const CANCEL_MARKER: &str = "<cancel>";
/// Marker printed before the process is terminated by the force-exit key.
pub const EXIT_MARKER: &str = "<exit>";
/// Shown when an answer is blank.
pub const EMPTY_MARKER: &str = "<empty>";

pub fn prefix() -> Vec<Span<'static>> {
    vec![
        Span::styled("?", Style::default().fg(Color::Green)),
        Span::raw(" "),
    ]
}

pub fn prompt_text(text: impl Into<String>) -> Span<'static> {
    Span::styled(
        format!("{} ", text.into()),
        Style::default().add_modifier(Modifier::BOLD),
    )
}

pub fn highlight(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(PRIMARY))
}

pub fn dim(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

/// `? <label> ` as the first spans of a line.
pub fn header(label: &str) -> Vec<Span<'static>> {
    let mut spans = prefix();
    spans.push(prompt_text(label));
    spans
}

/// The line left behind once a prompt resolves.
pub fn summary(label: &str, answer: Vec<Span<'static>>) -> Line<'static> {
    let mut spans = header(label);
    spans.extend(answer);
    Line::from(spans)
}

/// Plain text of a line, without styling.
pub fn plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_plain_text() {
        let line = summary("Name?", vec![highlight("Ada")]);
        assert_eq!(plain(&line), "? Name? Ada");
    }

    #[test]
    fn test_highlight_uses_primary_color() {
        assert_eq!(highlight("x").style.fg, Some(PRIMARY));
    }
}
