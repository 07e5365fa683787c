//! # Keypress
//!
//! The technology-neutral key event every prompt reacts to. Input adapters
//! (crossterm, scripted replays) translate their native events into this
//! shape; nothing in `core` knows where a keypress came from.

/// A single key event as delivered by a `KeySource`.
///
/// `key` is the key's name (`"up"`, `"enter"`, `"a"`, `"space"`, ...).
/// `sequence` is the text the key would type, empty for navigation keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypress {
    pub key: String,
    pub sequence: String,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
    /// True when the key produces consumable text (letters, digits, space).
    pub printable: bool,
}

impl Keypress {
    /// A non-printing key such as `"up"` or `"enter"`.
    pub fn named(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// A printable character. Uppercase letters carry `shift`, as terminals report them.
    pub fn char(c: char) -> Self {
        let key = if c == ' ' {
            "space".to_string()
        } else {
            c.to_string()
        };
        Self {
            key,
            sequence: c.to_string(),
            shift: c.is_uppercase(),
            printable: true,
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// The text this keypress inserts into a line editor, if any.
    ///
    /// Events carrying ctrl/meta are commands, not text.
    pub fn text(&self) -> Option<&str> {
        if self.ctrl || self.meta || !self.printable || self.sequence.is_empty() {
            return None;
        }
        Some(&self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_space_is_named_space() {
        let key = Keypress::char(' ');
        assert_eq!(key.key, "space");
        assert_eq!(key.text(), Some(" "));
    }

    #[test]
    fn test_uppercase_char_sets_shift() {
        assert!(Keypress::char('A').shift);
        assert!(!Keypress::char('a').shift);
    }

    #[test]
    fn test_text_ignores_modified_and_navigation_keys() {
        assert_eq!(Keypress::char('x').with_ctrl().text(), None);
        assert_eq!(Keypress::char('x').with_meta().text(), None);
        assert_eq!(Keypress::named("up").text(), None);
        assert_eq!(Keypress::char('x').with_shift().text(), Some("x"));
    }
}
