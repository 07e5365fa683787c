//! # Input Prompt
//!
//! Free-form single-line text. A default, when given, is shown in brackets
//! after the label and answers for a blank line.

use std::io;

use ratatui::text::{Line, Span};

use crate::core::key_combo::ComboError;
use crate::core::keypress::Keypress;
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::components::line_editor::{Editable, LineEditor, editing_bindings, insert_text};
use crate::tui::screen::{Frame, Screen};
use crate::tui::theme;

pub struct InputPrompt {
    label: String,
    default: Option<String>,
    editor: LineEditor,
}

impl InputPrompt {
    pub fn new(label: impl Into<String>, default: Option<String>) -> Self {
        Self {
            label: label.into(),
            default,
            editor: LineEditor::new(),
        }
    }

    fn submit(&mut self, screen: &mut Screen) -> io::Result<Step<String>> {
        let trimmed = self.editor.text().trim();
        let answer = match (trimmed.is_empty(), &self.default) {
            (true, Some(default)) => default.clone(),
            _ => trimmed.to_string(),
        };
        screen.clear()?;
        let shown = if answer.is_empty() {
            theme::EMPTY_MARKER
        } else {
            answer.as_str()
        };
        screen.println(theme::summary(&self.label, vec![theme::highlight(shown)]))?;
        Ok(Step::Resolve(answer))
    }
}

impl Editable for InputPrompt {
    fn editor(&mut self) -> &mut LineEditor {
        &mut self.editor
    }
}

impl Prompt for InputPrompt {
    type Output = String;

    fn label(&self) -> &str {
        &self.label
    }

    fn render(&mut self, frame: &mut Frame) {
        let mut spans = theme::header(&self.label);
        if let Some(default) = &self.default {
            spans.push(Span::raw(format!("[{default}] ")));
        }
        spans.push(Span::raw(self.editor.text().to_string()));
        frame.push(Line::from(spans));
        frame.set_cursor_back(self.editor.chars_after_cursor());
    }

    fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
        let mut bindings = editing_bindings()?;
        bindings.push(Binding::new(&["enter"], Self::submit)?);
        Ok(bindings)
    }

    fn default_action(&mut self, key: &Keypress, screen: &mut Screen) -> io::Result<Step<String>> {
        insert_text(self, key, screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{render_text, run_prompt, type_text};
    use crate::tui::render::Outcome;

    #[test]
    fn test_default_shown_in_brackets() {
        let mut prompt = InputPrompt::new("Name?", Some("Ada".into()));
        assert_eq!(render_text(&mut prompt), ["? Name? [Ada] "]);
    }

    #[test]
    fn test_enter_returns_trimmed_text() {
        let mut keys = type_text("  Grace ");
        keys.push(Keypress::named("enter"));
        let (outcome, _) = run_prompt(InputPrompt::new("Name?", Some("Ada".into())), keys);
        assert_eq!(outcome.unwrap(), Outcome::Resolved("Grace".to_string()));
    }

    #[test]
    fn test_blank_line_uses_default() {
        let (outcome, capture) = run_prompt(
            InputPrompt::new("Name?", Some("Ada".into())),
            [Keypress::char(' '), Keypress::named("enter")],
        );
        assert_eq!(outcome.unwrap(), Outcome::Resolved("Ada".to_string()));
        assert!(capture.contents().contains("Ada"));
    }

    #[test]
    fn test_blank_line_without_default_is_empty() {
        let (outcome, capture) = run_prompt(InputPrompt::new("Name?", None), [Keypress::named("enter")]);
        assert_eq!(outcome.unwrap(), Outcome::Resolved(String::new()));
        assert!(capture.contents().contains("<empty>"));
    }

    #[test]
    fn test_editing_keys_move_within_text() {
        let mut keys = type_text("ac");
        keys.extend([
            Keypress::named("left"),
            Keypress::char('b'),
            Keypress::named("home"),
            Keypress::named("delete"),
            Keypress::named("end"),
            Keypress::named("backspace"),
            Keypress::char('c').with_ctrl().with_meta(),
            Keypress::named("enter"),
        ]);
        // Ctrl+Meta+c is neither cancel nor text.
        let (outcome, _) = run_prompt(InputPrompt::new("Word", None), keys);
        assert_eq!(outcome.unwrap(), Outcome::Resolved("b".to_string()));
    }

    #[test]
    fn test_cursor_parked_before_trailing_text() {
        let mut prompt = InputPrompt::new("Word", None);
        prompt.editor().insert("abc");
        prompt.editor().left();
        let mut frame = Frame::new(None);
        prompt.render(&mut frame);
        assert_eq!(frame.cursor_back(), 1);
    }
}
