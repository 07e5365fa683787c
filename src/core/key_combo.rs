//! # Key Combinations
//!
//! A `KeyCombo` is a chord of modifier keys plus (optionally) one named key,
//! parsed from strings like `"Ctrl+c"`, `"shift + tab"` or `"Enter"`.
//!
//! ```text
//! "Ctrl+Shift+Esc"  →  KeyCombo { ctrl, shift, key: "Esc" }
//!                             │
//!                       test(&Keypress { key: "escape", ctrl, shift })  →  true
//! ```
//!
//! Matching goes through an alias table so a combo written with a display
//! name (`"Esc"`, `"Return"`, `"ArrowUp"`) matches the identifiers input
//! adapters emit (`"escape"`, `"enter"`, `"up"`) and vice versa.
//!
//! Alt/Option is not supported: terminals report it inconsistently, so a
//! combo asking for it is rejected instead of silently never matching.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::keypress::Keypress;

/// Groups of key names that refer to the same physical key.
const KEY_ALIASES: &[&[&str]] = &[
    &["Escape", "Esc"],
    &[" ", "Space"],
    &["ArrowLeft", "Left"],
    &["ArrowRight", "Right"],
    &["ArrowUp", "Up"],
    &["ArrowDown", "Down"],
    &["Enter", "Return"],
    &["Add", "Plus", "+"],
    &["Subtract", "Minus", "-"],
    &["Multiply", "Times", "*"],
    &["Divide", "Div", "/"],
    &["Decimal", "."],
    &["Separator", ","],
    &["PageUp", "PgUp"],
    &["PageDown", "PgDn"],
    &["Delete", "Del"],
    &["Insert", "Ins"],
    &["Backspace", "Bksp"],
];

fn alias_group(name: &str) -> Option<&'static [&'static str]> {
    KEY_ALIASES
        .iter()
        .copied()
        .find(|group| group.iter().any(|alias| alias.eq_ignore_ascii_case(name)))
}

/// True if two key names denote the same key (case-insensitive, alias-aware).
pub fn same_key(a: &str, b: &str) -> bool {
    if a.to_lowercase() == b.to_lowercase() {
        return true;
    }
    alias_group(a).is_some_and(|group| group.iter().any(|alias| alias.eq_ignore_ascii_case(b)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboError {
    /// The combo asked for a modifier the terminal layer cannot report.
    UnsupportedModifier(String),
}

impl fmt::Display for ComboError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComboError::UnsupportedModifier(name) => {
                write!(f, "the {name} modifier key is not supported")
            }
        }
    }
}

impl std::error::Error for ComboError {}

/// Naming convention used when displaying a combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Mac,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }

    fn meta_name(self) -> &'static str {
        match self {
            Platform::Windows => "Win",
            Platform::Linux => "Super",
            Platform::Mac => "Command",
        }
    }
}

/// A modifier chord plus an optional key. An empty `key` matches any key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyCombo {
    ctrl: bool,
    shift: bool,
    meta: bool,
    key: String,
}

impl KeyCombo {
    pub fn new(ctrl: bool, shift: bool, meta: bool, key: impl Into<String>) -> Self {
        Self {
            ctrl,
            shift,
            meta,
            key: key.into(),
        }
    }

    /// Parse `"Ctrl+Shift+Esc"` style strings.
    ///
    /// Tokens are separated by one or more `+` with optional whitespace around
    /// them. Modifier names are case-insensitive; `meta`, `super`, `win` and
    /// `command` all mean the meta key. If several non-modifier tokens appear,
    /// the last one is kept (`"Ctrl+A+B"` is `Ctrl+B`).
    pub fn parse(text: &str) -> Result<Self, ComboError> {
        let mut combo = KeyCombo::default();
        for part in text.trim().split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" => combo.ctrl = true,
                "shift" => combo.shift = true,
                "alt" | "option" => return Err(ComboError::UnsupportedModifier(part.to_string())),
                "meta" | "super" | "win" | "command" => combo.meta = true,
                _ => combo.key = part.to_string(),
            }
        }
        Ok(combo)
    }

    /// Test this combo against a keypress.
    pub fn test(&self, event: &Keypress) -> bool {
        self.ctrl == event.ctrl
            && self.shift == event.shift
            && self.meta == event.meta
            && (self.key.is_empty() || same_key(&self.key, &event.key))
    }

    pub fn ctrl(&self) -> bool {
        self.ctrl
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn meta(&self) -> bool {
        self.meta
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The display parts for a platform, e.g. `["Ctrl", "Super", "x"]`.
    pub fn parts(&self, platform: Platform) -> Vec<&str> {
        let mut parts = Vec::with_capacity(4);
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.meta {
            parts.push(platform.meta_name());
        }
        if self.shift {
            parts.push("Shift");
        }
        if !self.key.is_empty() {
            parts.push(self.key.as_str());
        }
        parts
    }

    pub fn display_for(&self, platform: Platform) -> String {
        self.parts(platform).join("+")
    }
}

impl PartialEq for KeyCombo {
    fn eq(&self, other: &Self) -> bool {
        self.ctrl == other.ctrl
            && self.shift == other.shift
            && self.meta == other.meta
            && same_key(&self.key, &other.key)
    }
}

impl Eq for KeyCombo {}

impl From<&Keypress> for KeyCombo {
    fn from(event: &Keypress) -> Self {
        Self::new(event.ctrl, event.shift, event.meta, event.key.clone())
    }
}

impl FromStr for KeyCombo {
    type Err = ComboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_for(Platform::current()))
    }
}
