//! # Password Prompt
//!
//! Like the input prompt, but the typed text is never echoed. Each typed
//! character shows as the next character of a repeating mask pattern, or
//! nothing at all when the mask is hidden.

use std::io;

use ratatui::text::{Line, Span};

use crate::core::key_combo::ComboError;
use crate::core::keypress::Keypress;
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::components::line_editor::{Editable, LineEditor, editing_bindings, insert_text};
use crate::tui::screen::{Frame, Screen};
use crate::tui::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mask {
    /// Repeat this pattern, one character per typed character. An empty
    /// pattern echoes nothing, like `Hidden`.
    Pattern(String),
    /// Echo nothing.
    Hidden,
}

impl Default for Mask {
    fn default() -> Self {
        Mask::Pattern("*".to_string())
    }
}

impl Mask {
    /// The echo for `count` typed characters.
    pub fn apply(&self, count: usize) -> String {
        match self {
            Mask::Pattern(pattern) if !pattern.is_empty() => pattern.chars().cycle().take(count).collect(),
            _ => String::new(),
        }
    }

    /// Whether typed characters show up at all.
    pub fn echoes(&self) -> bool {
        matches!(self, Mask::Pattern(pattern) if !pattern.is_empty())
    }
}

pub struct PasswordPrompt {
    label: String,
    mask: Mask,
    editor: LineEditor,
}

impl PasswordPrompt {
    pub fn new(label: impl Into<String>, mask: Mask) -> Self {
        Self {
            label: label.into(),
            mask,
            editor: LineEditor::new(),
        }
    }

    fn submit(&mut self, screen: &mut Screen) -> io::Result<Step<String>> {
        let typed = self.editor.text().chars().count();
        screen.clear()?;
        screen.println(theme::summary(&self.label, vec![theme::dim(self.mask.apply(typed))]))?;
        Ok(Step::Resolve(self.editor.text().to_string()))
    }
}

impl Editable for PasswordPrompt {
    fn editor(&mut self) -> &mut LineEditor {
        &mut self.editor
    }
}

impl Prompt for PasswordPrompt {
    type Output = String;

    fn label(&self) -> &str {
        &self.label
    }

    fn render(&mut self, frame: &mut Frame) {
        let typed = self.editor.text().chars().count();
        let mut spans = theme::header(&self.label);
        spans.push(Span::raw(self.mask.apply(typed)));
        frame.push(Line::from(spans));
        if self.mask.echoes() {
            frame.set_cursor_back(self.editor.chars_after_cursor());
        }
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
