//! # Selection Graph
//!
//! Which checkbox choices are selected, plus the dependency edges between
//! them. Edges are resolved once, when the graph is built:
//!
//! ```text
//! requires[c] = [b]      selecting c selects b (and b's requirements)
//! requires[b] = [a]      deselecting a deselects b (and whatever requires b)
//! ```
//!
//! Both cascades walk an explicit stack and skip indices whose membership
//! already matches, so cyclic declarations terminate.

use log::debug;

use super::choice::{Choice, DependencyRef};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionGraph {
    requires: Vec<Vec<usize>>,
    /// Selected indices in the order they were selected.
    selected: Vec<usize>,
}

impl SelectionGraph {
    /// Resolve dependency references and apply initially-selected choices.
    ///
    /// References to unknown labels or out-of-range indices are dropped.
    pub fn new<T>(choices: &[Choice<T>]) -> Self {
        let requires = choices
            .iter()
            .enumerate()
            .map(|(index, choice)| resolve(index, &choice.requires, choices))
            .collect();
        let mut graph = Self {
            requires,
            selected: Vec::new(),
        };
        for (index, choice) in choices.iter().enumerate() {
            if choice.selected {
                graph.select(index);
            }
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.requires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indices in selection order.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn requirements(&self, index: usize) -> &[usize] {
        self.requires.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Select `index` and everything it transitively requires.
    pub fn select(&mut self, index: usize) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            if current >= self.len() || self.is_selected(current) {
                continue;
            }
            self.selected.push(current);
            // Reverse so requirements are visited in declaration order.
            stack.extend(self.requires[current].iter().rev());
        }
    }

    /// Deselect `index` and everything that transitively requires it.
    pub fn deselect(&mut self, index: usize) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(position) = self.selected.iter().position(|&i| i == current) else {
                continue;
            };
            self.selected.remove(position);
            let snapshot = self.selected.clone();
            stack.extend(
                snapshot
                    .into_iter()
                    .rev()
                    .filter(|&dependent| self.requires[dependent].contains(&current)),
            );
        }
    }

    /// Deselect if selected, otherwise select.
    pub fn toggle(&mut self, index: usize) {
        if self.is_selected(index) {
            self.deselect(index);
        } else {
            self.select(index);
        }
    }
}

fn resolve<T>(index: usize, refs: &[DependencyRef], choices: &[Choice<T>]) -> Vec<usize> {
    let mut resolved = Vec::with_capacity(refs.len());
    for dependency in refs {
        let target = match dependency {
            DependencyRef::Index(i) => Some(*i).filter(|&i| i < choices.len()),
            DependencyRef::Label(label) => choices.iter().position(|c| &c.label == label),
        };
        match target {
            Some(target) if !resolved.contains(&target) => resolved.push(target),
            Some(_) => {}
            None => debug!("Dropping unresolved dependency {dependency:?} of choice {index}"),
        }
    }
    resolved
}
