//! Question library exports

use clap::ValueEnum;

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::choice::{Choice, DependencyRef};
pub use crate::core::config::ResolvedConfig;
pub use crate::core::key_combo::KeyCombo;
pub use crate::core::keypress::Keypress;
pub use crate::tui::components::Mask;
pub use crate::tui::render::PromptError;
pub use crate::tui::{Answer, Terminal};

/// The prompt kinds a caller can ask for by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    List,
    Checkbox,
    Input,
    Confirm,
    Password,
}

impl PromptKind {
    /// Look up a kind by its tag (`"list"`, `"checkbox"`, ...), ignoring case.
    pub fn parse(tag: &str) -> Result<Self, PromptError> {
        <Self as ValueEnum>::from_str(tag, true).map_err(|_| PromptError::UnknownKind(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_kind_tags() {
        assert_eq!(PromptKind::parse("list").unwrap(), PromptKind::List);
        assert_eq!(PromptKind::parse("Checkbox").unwrap(), PromptKind::Checkbox);
        assert!(matches!(
            PromptKind::parse("form"),
            Err(PromptError::UnknownKind(kind)) if kind == "form"
        ));
    }
}
