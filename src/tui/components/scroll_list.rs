//! # ScrollList Component
//!
//! The windowed item list shared by `ListPrompt` and `CheckboxPrompt`.
//!
//! ## Responsibilities
//!
//! - Own the `Viewport` and the indicator glyphs
//! - Size the window against the terminal height on every render
//! - Provide the navigation bindings (Up/Down/Home/End/PageUp/PageDown)
//!
//! Rows themselves are drawn by the owning prompt, which knows whether a
//! row is marked, selected or plain.

use std::io;

use ratatui::text::Line;

use crate::core::choice::Choice;
use crate::core::config::{DEFAULT_WINDOW_SIZE, ResolvedConfig};
use crate::core::key_combo::ComboError;
use crate::core::viewport::{Glyphs, Viewport, indicator_width};
use crate::tui::component::{Binding, Prompt, Step};
use crate::tui::screen::{Frame, Screen};
use crate::tui::theme;

/// Per-prompt list configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub window_size: usize,
    pub offset_window_scroll: bool,
    pub glyphs: Glyphs,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            offset_window_scroll: true,
            glyphs: Glyphs::default(),
        }
    }
}

impl From<&ResolvedConfig> for ListSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            window_size: config.window_size,
            offset_window_scroll: config.offset_window_scroll,
            glyphs: config.glyphs.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

pub struct ScrollList {
    viewport: Viewport,
    glyphs: Glyphs,
    indicator_width: usize,
}

impl ScrollList {
    /// Prompts only build one over a non-empty `choices`.
    pub(crate) fn new<T>(choices: &[Choice<T>], settings: &ListSettings) -> Self {
        Self {
            viewport: Viewport::new(
                choices.len(),
                settings.window_size,
                settings.offset_window_scroll,
            ),
            glyphs: settings.glyphs.clone(),
            indicator_width: indicator_width(choices.iter().map(|c| c.label.as_str())),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> usize {
        self.viewport.cursor()
    }

    /// Returns true if the cursor moved (and a redraw is due).
    pub fn navigate(&mut self, nav: Nav) -> bool {
        match nav {
            Nav::Up => self.viewport.move_up(),
            Nav::Down => self.viewport.move_down(),
            Nav::Home => self.viewport.home(),
            Nav::End => self.viewport.end(),
            Nav::PageUp => self.viewport.page_up(),
            Nav::PageDown => self.viewport.page_down(),
        }
    }

    /// Push the visible rows, framed by indicator rows when windowed.
    ///
    /// `row(index, is_cursor)` draws a single item.
    pub fn render(&mut self, frame: &mut Frame, row: impl Fn(usize, bool) -> Line<'static>) {
        self.viewport.fit_rows(frame.rows());
        let indicators = self.viewport.indicators(&self.glyphs, self.indicator_width);

        if let Some((above, _)) = &indicators {
            frame.push(theme::dim(above.clone()));
        }
        let cursor = self.viewport.cursor();
        for index in self.viewport.visible_range() {
            frame.push(row(index, index == cursor));
        }
        if let Some((_, below)) = indicators {
            frame.push(theme::dim(below));
        }
    }
}

/// Prompts built around a `ScrollList`.
pub trait Scrollable: Prompt {
    fn scroll_list(&mut self) -> &mut ScrollList;
}

fn navigate<P: Scrollable>(prompt: &mut P, screen: &mut Screen, nav: Nav) -> io::Result<Step<P::Output>> {
    if prompt.scroll_list().navigate(nav) {
        screen.redraw(prompt)?;
    }
    Ok(Step::Continue)
}

/// Cursor movement bindings for any `Scrollable` prompt.
pub fn navigation_bindings<P: Scrollable>() -> Result<Vec<Binding<P>>, ComboError> {
    Ok(vec![
        Binding::new(&["up"], |p, s| navigate(p, s, Nav::Up))?,
        Binding::new(&["down"], |p, s| navigate(p, s, Nav::Down))?,
        Binding::new(&["home"], |p, s| navigate(p, s, Nav::Home))?,
        Binding::new(&["end"], |p, s| navigate(p, s, Nav::End))?,
        Binding::new(&["pageup"], |p, s| navigate(p, s, Nav::PageUp))?,
        Binding::new(&["pagedown"], |p, s| navigate(p, s, Nav::PageDown))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choice::from_labels;
    use ratatui::text::Span;

    fn rows(list: &mut ScrollList, terminal_rows: Option<u16>) -> Vec<String> {
        let mut frame = Frame::new(terminal_rows);
        list.render(&mut frame, |i, current| {
            Line::from(Span::raw(format!("{}{}", if current { ">" } else { " " }, i)))
        });
        frame.text()
    }

    fn settings(window_size: usize) -> ListSettings {
        ListSettings {
            window_size,
            offset_window_scroll: true,
            glyphs: Glyphs {
                more_above: "^".into(),
                more_below: "v".into(),
                no_more: "-".into(),
            },
        }
    }

    #[test]
    fn test_unwindowed_list_has_no_indicators() {
        let mut list = ScrollList::new(&from_labels(["a", "b"]), &settings(5));
        assert_eq!(rows(&mut list, None), [">0", " 1"]);
    }

    #[test]
    fn test_windowed_list_draws_fixed_width_indicators() {
        let mut list = ScrollList::new(&from_labels(["a", "b", "c"]), &settings(2));
        let dash = "-".repeat(15);
        let vee = "v".repeat(15);
        assert_eq!(rows(&mut list, None), [dash.as_str(), ">0", " 1", vee.as_str()]);
    }

    #[test]
    fn test_terminal_height_limits_window() {
        let labels: Vec<String> = (0..20).map(|i| format!("item {i}")).collect();
        let mut list = ScrollList::new(&from_labels(labels), &settings(10));
        // 7 rows minus the fixed chrome leaves 3 items.
        let drawn = rows(&mut list, Some(7));
        assert_eq!(drawn.len(), 5);
        assert_eq!(list.viewport().window_size(), 3);
    }

    #[test]
    fn test_navigate_reports_movement() {
        let mut list = ScrollList::new(&from_labels(["a", "b", "c"]), &settings(2));
        assert!(!list.navigate(Nav::Up));
        assert!(list.navigate(Nav::End));
        assert_eq!(list.cursor(), 2);
        assert!(list.navigate(Nav::Home));
        assert!(list.navigate(Nav::PageDown));
        assert_eq!(list.cursor(), 2);
    }
}
