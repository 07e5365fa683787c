//! # Choices
//!
//! The items a list or checkbox prompt offers. A choice pairs a display
//! label with an opaque value, and for checkboxes may start selected or
//! require other choices.

/// A reference from one choice to another, resolved against its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRef {
    Index(usize),
    Label(String),
}

impl From<usize> for DependencyRef {
    fn from(index: usize) -> Self {
        DependencyRef::Index(index)
    }
}

impl From<&str> for DependencyRef {
    fn from(label: &str) -> Self {
        DependencyRef::Label(label.to_string())
    }
}

impl From<String> for DependencyRef {
    fn from(label: String) -> Self {
        DependencyRef::Label(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
    /// Selected when the prompt opens (checkbox only).
    pub selected: bool,
    /// Choices that must be selected whenever this one is (checkbox only).
    pub requires: Vec<DependencyRef>,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            selected: false,
            requires: Vec::new(),
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn requires(mut self, dependency: impl Into<DependencyRef>) -> Self {
        self.requires.push(dependency.into());
        self
    }
}

impl Choice<String> {
    /// A choice whose value is its own label.
    pub fn labelled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label)
    }
}

/// Build choices from plain labels; each value is the label.
pub fn from_labels<I, S>(labels: I) -> Vec<Choice<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Choice::labelled).collect()
}

/// Build choices from ordered `(label, value)` pairs.
pub fn from_pairs<I, S, T>(pairs: I) -> Vec<Choice<T>>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
{
    pairs
        .into_iter()
        .map(|(label, value)| Choice::new(label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_uses_label_as_value() {
        let choices = from_labels(["hello", "world"]);
        assert_eq!(choices[1].label, "world");
        assert_eq!(choices[1].value, "world");
        assert!(!choices[0].selected);
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let choices = from_pairs([("Cheese", 1), ("Milk", 2), ("Tofu", 3)]);
        let labels: Vec<_> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Cheese", "Milk", "Tofu"]);
        assert_eq!(choices[2].value, 3);
    }

    #[test]
    fn test_builder_collects_requirements() {
        let choice = Choice::labelled("Salami").requires("Garlic").requires(0).selected(true);
        assert!(choice.selected);
        assert_eq!(
            choice.requires,
            vec![DependencyRef::Label("Garlic".into()), DependencyRef::Index(0)]
        );
    }
}
