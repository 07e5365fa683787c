//! # Viewport
//!
//! A scrolling window over a list of `item_count` rows, following a cursor.
//!
//! ```text
//!   offset ──►  ┌───────────┐  ▲ ▲ ▲ ▲   (indicator row)
//!               │  beta     │
//!   cursor ──►  │ ❯gamma    │  window_size rows
//!               │  delta    │
//!               └───────────┘  ▼ ▼ ▼ ▼   (indicator row)
//! ```
//!
//! Invariants, held after every operation:
//!
//! - `cursor < item_count`
//! - `offset <= item_count - window_size`
//! - `offset <= cursor < offset + window_size`
//!
//! With `offset_window_scroll` enabled the window scrolls one step early so
//! the row after the cursor (in the direction of travel) stays visible while
//! there is anything left to reveal.

use std::ops::Range;

/// Rows a windowed prompt spends on things other than items: the label line,
/// both indicator rows and the line the terminal cursor rests on.
pub const FIXED_CHROME: usize = 4;

/// Minimum width of an indicator row, in characters.
pub const MIN_INDICATOR_WIDTH: usize = 15;

/// Repeating patterns for the rows drawn above and below a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    pub more_above: String,
    pub more_below: String,
    pub no_more: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            more_above: "▲ ".to_string(),
            more_below: "▼ ".to_string(),
            no_more: "─".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Travel {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    item_count: usize,
    desired_size: usize,
    window_size: usize,
    cursor: usize,
    offset: usize,
    offset_window_scroll: bool,
}

impl Viewport {
    /// Create a viewport with the cursor on the first item.
    ///
    /// An `item_count` of 0 is counted as 1 so the window is never empty.
    pub fn new(item_count: usize, desired_size: usize, offset_window_scroll: bool) -> Self {
        let item_count = item_count.max(1);
        Self {
            item_count,
            desired_size,
            window_size: desired_size.clamp(1, item_count),
            cursor: 0,
            offset: 0,
            offset_window_scroll,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.offset..self.offset + self.window_size
    }

    /// True when some items are outside the window (indicator rows are shown).
    pub fn is_windowed(&self) -> bool {
        self.window_size < self.item_count
    }

    pub fn has_more_above(&self) -> bool {
        self.offset > 0
    }

    pub fn has_more_below(&self) -> bool {
        self.offset + self.window_size < self.item_count
    }

    fn max_offset(&self) -> usize {
        self.item_count - self.window_size
    }

    /// Rows of lookahead kept beyond the cursor.
    fn lead(&self) -> usize {
        usize::from(self.offset_window_scroll && self.window_size > 1)
    }

    /// Recompute the window size against the terminal height.
    ///
    /// Returns true if the size changed. `None` means the height is unknown
    /// and the desired size is used as is.
    pub fn fit_rows(&mut self, rows: Option<u16>) -> bool {
        let mut size = self.desired_size;
        if let Some(rows) = rows {
            size = size.min((rows as usize).saturating_sub(FIXED_CHROME));
        }
        let size = size.clamp(1, self.item_count);
        if size == self.window_size {
            return false;
        }
        self.window_size = size;
        self.offset = self.offset.min(self.max_offset());
        if self.cursor >= self.offset + size {
            self.offset = self.cursor + 1 - size;
        }
        true
    }

    /// Move the cursor by `delta` rows, clamped to the list.
    ///
    /// Returns false (and changes nothing) if the cursor would not move.
    pub fn move_by(&mut self, delta: isize) -> bool {
        let last = self.item_count - 1;
        let target = self.cursor.saturating_add_signed(delta).min(last);
        if target == self.cursor {
            return false;
        }
        let travel = if target > self.cursor {
            Travel::Down
        } else {
            Travel::Up
        };
        self.cursor = target;
        self.follow(travel);
        true
    }

    pub fn move_up(&mut self) -> bool {
        self.move_by(-1)
    }

    pub fn move_down(&mut self) -> bool {
        self.move_by(1)
    }

    pub fn home(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = 0;
        self.offset = 0;
        true
    }

    pub fn end(&mut self) -> bool {
        let last = self.item_count - 1;
        if self.cursor == last {
            return false;
        }
        self.cursor = last;
        self.offset = self.max_offset();
        true
    }

    pub fn page_up(&mut self) -> bool {
        let target = self.cursor.saturating_sub(self.window_size);
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        self.anchor(Travel::Up);
        true
    }

    pub fn page_down(&mut self) -> bool {
        let target = (self.cursor + self.window_size).min(self.item_count - 1);
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        self.anchor(Travel::Down);
        true
    }

    /// Minimal scroll that keeps the cursor (plus lookahead) inside the window.
    fn follow(&mut self, travel: Travel) {
        match travel {
            Travel::Down => {
                let min_offset = (self.cursor + 1 + self.lead()).saturating_sub(self.window_size);
                self.offset = self.offset.max(min_offset);
            }
            Travel::Up => {
                self.offset = self.offset.min(self.cursor.saturating_sub(self.lead()));
            }
        }
        self.clamp_offset();
    }

    /// Place the window so the cursor sits at its leading edge.
    fn anchor(&mut self, travel: Travel) {
        self.offset = match travel {
            Travel::Down => (self.cursor + 1 + self.lead()).saturating_sub(self.window_size),
            Travel::Up => self.cursor.saturating_sub(self.lead()),
        };
        self.clamp_offset();
    }

    fn clamp_offset(&mut self) {
        let lowest = (self.cursor + 1).saturating_sub(self.window_size);
        self.offset = self.offset.clamp(lowest, self.cursor).min(self.max_offset());
    }

    /// The indicator rows drawn above and below the window, or `None` when
    /// every item fits.
    pub fn indicators(&self, glyphs: &Glyphs, width: usize) -> Option<(String, String)> {
        if !self.is_windowed() {
            return None;
        }
        let above = if self.has_more_above() {
            &glyphs.more_above
        } else {
            &glyphs.no_more
        };
        let below = if self.has_more_below() {
            &glyphs.more_below
        } else {
            &glyphs.no_more
        };
        Some((indicator_row(above, width), indicator_row(below, width)))
    }
}

/// Width of the indicator rows for a set of labels.
pub fn indicator_width<'a>(labels: impl IntoIterator<Item = &'a str>) -> usize {
    let longest = labels
        .into_iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    MIN_INDICATOR_WIDTH.max(longest + 4)
}

/// Repeat `pattern` until it is exactly `width` characters long.
pub fn indicator_row(pattern: &str, width: usize) -> String {
    if pattern.is_empty() {
        return " ".repeat(width);
    }
    pattern.chars().cycle().take(width).collect()
}
