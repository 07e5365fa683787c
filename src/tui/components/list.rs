//! # List Prompt
//!
//! Pick exactly one choice.
//!
//! Controls:
//! - `Up` / `Down` move the cursor one row
//! - `Home` / `End` jump to the first / last choice
//! - `PageUp` / `PageDown` move one window at a time
//! - `Enter` answers with the choice under the cursor

use std::io;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::core::choice::Choice;
use crate::core::key_combo::ComboError;
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::components::scroll_list::{ListSettings, ScrollList, Scrollable, navigation_bindings};
use crate::tui::screen::{Frame, Screen};
use crate::tui::theme;

pub struct ListPrompt<T> {
    label: String,
    choices: Vec<Choice<T>>,
    list: ScrollList,
}

impl<T> ListPrompt<T> {
    /// `None` when there is nothing to choose from.
    pub fn new(label: impl Into<String>, choices: Vec<Choice<T>>, settings: &ListSettings) -> Option<Self> {
        if choices.is_empty() {
            return None;
        }
        let list = ScrollList::new(&choices, settings);
        Some(Self {
            label: label.into(),
            choices,
            list,
        })
    }

    pub fn cursor(&self) -> usize {
        self.list.cursor()
    }

    fn submit(&mut self, screen: &mut Screen) -> io::Result<Step<T>> {
        screen.clear()?;
        let choice = self.choices.swap_remove(self.list.cursor());
        screen.println(theme::summary(&self.label, vec![theme::highlight(choice.label)]))?;
        Ok(Step::Resolve(choice.value))
    }
}

impl<T> Scrollable for ListPrompt<T> {
    fn scroll_list(&mut self) -> &mut ScrollList {
        &mut self.list
    }
}

impl<T> Prompt for ListPrompt<T> {
    type Output = T;

    fn label(&self) -> &str {
        &self.label
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.push(Line::from(theme::header(&self.label)));
        let choices = &self.choices;
        self.list.render(frame, |index, current| {
            let style = if current {
                Style::default().fg(theme::PRIMARY)
            } else {
                Style::default()
            };
            let marker = if current { "❯ " } else { "  " };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(choices[index].label.clone(), style),
            ])
        });
    }

    fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
        let mut bindings = navigation_bindings()?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choice::{from_labels, from_pairs};
    use crate::core::keypress::Keypress;
    use crate::test_support::{render_text, run_prompt};
    use crate::tui::components::scroll_list::Nav;
    use crate::tui::render::Outcome;

    fn settings(window_size: usize) -> ListSettings {
        ListSettings {
            window_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_choices_builds_no_prompt() {
        assert!(ListPrompt::new("Pick", Vec::<Choice<String>>::new(), &settings(5)).is_none());
    }

    #[test]
    fn test_initial_render() {
        let mut prompt = ListPrompt::new("Pick", from_labels(["hello", "world"]), &settings(5)).unwrap();
        assert_eq!(render_text(&mut prompt), ["? Pick ", "❯ hello", "  world"]);
    }

    #[test]
    fn test_enter_returns_value_under_cursor() {
        let prompt = ListPrompt::new(
            "Food",
            from_pairs([("Cheese", "cheese"), ("Milk", "milk"), ("Tofu", "tofu")]),
            &settings(5),
        )
        .unwrap();
        let (outcome, capture) = run_prompt(
            prompt,
            [Keypress::named("down"), Keypress::named("down"), Keypress::named("enter")],
        );
        assert_eq!(outcome.unwrap(), Outcome::Resolved("tofu"));
        assert!(capture.contents().contains("Tofu"));
    }

    #[test]
    fn test_scrolling_window_scenario() {
        let mut prompt = ListPrompt::new("Greek", from_labels(["alpha", "beta", "gamma"]), &settings(2)).unwrap();
        let more = "▼ ".chars().cycle().take(15).collect::<String>();
        let above = "▲ ".chars().cycle().take(15).collect::<String>();
        let none = "─".repeat(15);

        let first = render_text(&mut prompt);
        assert_eq!(first[1..], [none.clone(), "❯ alpha".into(), "  beta".into(), more]);

        // The window pre-scrolls so the row after the cursor stays visible.
        assert!(prompt.scroll_list().navigate(Nav::Down));
        let second = render_text(&mut prompt);
        assert_eq!(second[1..], [above, "❯ beta".into(), "  gamma".into(), none]);
    }

    #[test]
    fn test_redraw_clears_exactly_previous_lines() {
        let prompt = ListPrompt::new("Pick", from_labels(["a", "b", "c", "d"]), &settings(2)).unwrap();
        let (outcome, capture) = run_prompt(prompt, [Keypress::named("down"), Keypress::named("enter")]);
        assert_eq!(outcome.unwrap(), Outcome::Resolved("b".to_string()));
        // Two full draws of 5 lines (4 breaks each) and two clears moving up 4 rows each.
        assert_eq!(capture.contents().matches("\x1b[1A").count(), 8);
    }

    #[test]
    fn test_cursor_hidden_while_active() {
        let prompt = ListPrompt::new("Pick", from_labels(["a"]), &settings(2)).unwrap();
        let (_, capture) = run_prompt(prompt, [Keypress::named("enter")]);
        let out = capture.contents();
        let hide = out.find("\x1b[?25l").unwrap();
        let show = out.rfind("\x1b[?25h").unwrap();
        assert!(hide < show);
    }

    #[test]
    fn test_boundary_moves_do_not_redraw() {
        let prompt = ListPrompt::new("Pick", from_labels(["a", "b"]), &settings(5)).unwrap();
        let (_, capture) = run_prompt(
            prompt,
            [Keypress::named("up"), Keypress::named("home"), Keypress::named("enter")],
        );
        // Only the final clear before the summary moves up.
        assert_eq!(capture.contents().matches("\x1b[1A").count(), 2);
    }
}
