//! # Checkbox Prompt
//!
//! Mark any number of choices. Marking a choice also marks everything it
//! requires; unmarking it unmarks everything that requires it.
//!
//! Controls:
//! - `Up` / `Down` / `Home` / `End` / `PageUp` / `PageDown` move the cursor
//! - `Space` marks or unmarks the choice under the cursor
//! - `Enter` answers with the marked values, in the order they were marked

use std::io;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::core::choice::Choice;
use crate::core::key_combo::ComboError;
use crate::core::selection::SelectionGraph;
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::components::scroll_list::{ListSettings, ScrollList, Scrollable, navigation_bindings};
use crate::tui::screen::{Frame, Screen};
use crate::tui::theme;

const MARKED: &str = "☒";
const UNMARKED: &str = "☐";

pub struct CheckboxPrompt<T> {
    label: String,
    choices: Vec<Choice<T>>,
    selection: SelectionGraph,
    list: ScrollList,
}

impl<T> CheckboxPrompt<T> {
    /// `None` when there is nothing to choose from.
    pub fn new(label: impl Into<String>, choices: Vec<Choice<T>>, settings: &ListSettings) -> Option<Self> {
        if choices.is_empty() {
            return None;
        }
        let selection = SelectionGraph::new(&choices);
        let list = ScrollList::new(&choices, settings);
        Some(Self {
            label: label.into(),
            choices,
            selection,
            list,
        })
    }

    pub fn selection(&self) -> &SelectionGraph {
        &self.selection
    }

    fn toggle(&mut self, screen: &mut Screen) -> io::Result<Step<Vec<T>>> {
        let cursor = self.list.cursor();
        self.selection.toggle(cursor);
        log::debug!(
            "Toggled {:?}, selection is now {:?}",
            self.choices[cursor].label,
            self.selection.selected()
        );
        screen.redraw(self)?;
        Ok(Step::Continue)
    }

    fn submit(&mut self, screen: &mut Screen) -> io::Result<Step<Vec<T>>> {
        screen.clear()?;
        let order = self.selection.selected().to_vec();
        let mut slots: Vec<Option<Choice<T>>> = self.choices.drain(..).map(Some).collect();
        let marked: Vec<Choice<T>> = order.into_iter().filter_map(|index| slots[index].take()).collect();

        let answer = if marked.is_empty() {
            vec![theme::highlight(theme::EMPTY_MARKER)]
        } else {
            let mut spans = Vec::with_capacity(marked.len() * 2);
            for (position, choice) in marked.iter().enumerate() {
                if position > 0 {
                    spans.push(Span::raw(", "));
                }
                spans.push(theme::highlight(choice.label.clone()));
            }
            spans
        };
        screen.println(theme::summary(&self.label, answer))?;
        Ok(Step::Resolve(marked.into_iter().map(|choice| choice.value).collect()))
    }
}

impl<T> Scrollable for CheckboxPrompt<T> {
    fn scroll_list(&mut self) -> &mut ScrollList {
        &mut self.list
    }
}

impl<T> Prompt for CheckboxPrompt<T> {
    type Output = Vec<T>;

    fn label(&self) -> &str {
        &self.label
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.push(Line::from(theme::header(&self.label)));
        let choices = &self.choices;
        let selection = &self.selection;
        self.list.render(frame, |index, current| {
            let style = if current {
                Style::default().fg(theme::PRIMARY)
            } else {
                Style::default()
            };
            let mark = if selection.is_selected(index) { MARKED } else { UNMARKED };
            Line::from(Span::styled(
                format!(
                    "{} {mark} {}",
                    if current { ">" } else { " " },
                    choices[index].label
                ),
                style,
            ))
        });
    }

    fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
        let mut bindings = navigation_bindings()?;
        bindings.push(Binding::new(&["space"], Self::toggle)?);
        bindings.push(Binding::new(&["enter"], Self::submit)?);
        Ok(bindings)
    }

    fn setup(&mut self, screen: &mut Screen) -> io::Result<()> {
        screen.hide_cursor()
    }

    fn teardown(&mut self, screen: &mut Screen) -> io::Result<()> {
        screen.show_cursor()
    }
}
