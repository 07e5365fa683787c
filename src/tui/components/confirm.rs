//! # Confirm Prompt
//!
//! A yes/no question answered by typing. Anything starting with `y` or `n`
//! (either case) is an answer; a blank line takes the default, if any.
//! Other input is ignored on Enter and the prompt stays open.

use std::io;

use ratatui::text::{Line, Span};

use crate::core::key_combo::ComboError;
use crate::core::keypress::Keypress;
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::components::line_editor::{Editable, LineEditor, editing_bindings, insert_text};
use crate::tui::screen::{Frame, Screen};
use crate::tui::theme;

pub struct ConfirmPrompt {
    label: String,
    default: Option<bool>,
    editor: LineEditor,
}

impl ConfirmPrompt {
    pub fn new(label: impl Into<String>, default: Option<bool>) -> Self {
        Self {
            label: label.into(),
            default,
            editor: LineEditor::new(),
        }
    }

    fn hint(&self) -> &'static str {
        match self.default {
            None => "[y/n]",
            Some(true) => "[Y/n]",
            Some(false) => "[y/N]",
        }
    }

    /// The answer the current text stands for, if any.
    pub fn parse(&self) -> Option<bool> {
        match self.editor.text().trim_start().chars().next() {
            None => self.default,
            Some(c) => match c.to_ascii_lowercase() {
                'y' => Some(true),
                'n' => Some(false),
                _ => None,
            },
        }
    }

    fn submit(&mut self, screen: &mut Screen) -> io::Result<Step<bool>> {
        let Some(answer) = self.parse() else {
            log::debug!("Ignoring unrecognised answer {:?}", self.editor.text());
            return Ok(Step::Continue);
        };
        screen.clear()?;
        let shown = if answer { "Yes" } else { "No" };
        screen.println(theme::summary(&self.label, vec![theme::highlight(shown)]))?;
        Ok(Step::Resolve(answer))
    }
}

impl Editable for ConfirmPrompt {
    fn editor(&mut self) -> &mut LineEditor {
        &mut self.editor
    }
}

impl Prompt for ConfirmPrompt {
    type Output = bool;

    fn label(&self) -> &str {
        &self.label
    }

    fn render(&mut self, frame: &mut Frame) {
        let mut spans = theme::prefix();
        spans.push(theme::prompt_text(format!("{} {}", self.label, self.hint())));
        spans.push(Span::raw(self.editor.text().to_string()));
        frame.push(Line::from(spans));
        frame.set_cursor_back(self.editor.chars_after_cursor());
    }

    fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
        let mut bindings = editing_bindings()?;
        bindings.push(Binding::new(&["enter"], Self::submit)?);
        Ok(bindings)
    }

    fn default_action(&mut self, key: &Keypress, screen: &mut Screen) -> io::Result<Step<bool>> {
        insert_text(self, key, screen)
    }
}
