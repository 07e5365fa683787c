//! # LineEditor
//!
//! Single-line text buffer with a cursor, shared by the input, confirm and
//! password prompts.
//!
//! The cursor is a byte offset that always sits on a character boundary
//! (`0..=text.len()`), so multi-byte input is edited one character at a
//! time. Every editing method reports whether anything changed; callers
//! redraw only when it did.

use std::io;

use crate::core::key_combo::ComboError;
use crate::core::keypress::Keypress;
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::screen::Screen;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    pos: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Characters between the cursor and the end of the line, i.e. how far
    /// the terminal cursor sits left of the echoed text's end.
    pub fn chars_after_cursor(&self) -> usize {
        self.text[self.pos..].chars().count()
    }

    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.text.insert_str(self.pos, text);
        self.pos += text.len();
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let prev = prev_char_boundary(&self.text, self.pos);
        self.text.drain(prev..self.pos);
        self.pos = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.pos >= self.text.len() {
            return false;
        }
        let next = next_char_boundary(&self.text, self.pos);
        self.text.drain(self.pos..next);
        true
    }

    pub fn left(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(&self.text, self.pos);
        true
    }

    pub fn right(&mut self) -> bool {
        if self.pos >= self.text.len() {
            return false;
        }
        self.pos = next_char_boundary(&self.text, self.pos);
        true
    }

    pub fn home(&mut self) -> bool {
        (self.pos != 0).then(|| self.pos = 0).is_some()
    }

    pub fn end(&mut self) -> bool {
        let end = self.text.len();
        (self.pos != end).then(|| self.pos = end).is_some()
    }
}

/// Byte offset of the character before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character after the one starting at `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Prompts built around a `LineEditor`.
pub trait Editable: Prompt {
    fn editor(&mut self) -> &mut LineEditor;
}

fn edit<P: Editable>(
    prompt: &mut P,
    screen: &mut Screen,
    change: fn(&mut LineEditor) -> bool,
) -> io::Result<Step<P::Output>> {
    if change(prompt.editor()) {
        screen.redraw(prompt)?;
    }
    Ok(Step::Continue)
}

/// Cursor movement and deletion bindings for any `Editable` prompt.
pub fn editing_bindings<P: Editable>() -> Result<Vec<Binding<P>>, ComboError> {
    Ok(vec![
        Binding::new(&["left"], |p, s| edit(p, s, LineEditor::left))?,
        Binding::new(&["right"], |p, s| edit(p, s, LineEditor::right))?,
        Binding::new(&["up", "home"], |p, s| edit(p, s, LineEditor::home))?,
        Binding::new(&["down", "end"], |p, s| edit(p, s, LineEditor::end))?,
        Binding::new(&["backspace"], |p, s| edit(p, s, LineEditor::backspace))?,
        Binding::new(&["delete"], |p, s| edit(p, s, LineEditor::delete))?,
    ])
}

/// Default action for `Editable` prompts: insert typed text at the cursor.
pub fn insert_text<P: Editable>(
    prompt: &mut P,
    key: &Keypress,
    screen: &mut Screen,
) -> io::Result<Step<P::Output>> {
    let inserted = key.text().is_some_and(|text| prompt.editor().insert(text));
    if inserted {
        screen.redraw(prompt)?;
    }
    Ok(Step::Continue)
}
