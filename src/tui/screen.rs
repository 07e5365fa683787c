//! # Screen
//!
//! Inline drawing with exact undo. A prompt draws a `Frame` (a handful of
//! styled lines) below the shell cursor; `clear()` must erase exactly what
//! the last draw printed, no more and no less.
//!
//! ```text
//! render()   ? Pick one          ◄── row 0 (cursor returns here on clear)
//!            ❯ alpha                 row 1
//!              beta                  row 2   printed = 2
//!
//! clear()    for each printed row: erase line, move up
//!            erase row 0, column 0
//! ```
//!
//! The count is recorded on every draw, so callers never have to know how
//! many lines a prompt produced.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveLeft, MoveToColumn, MoveUp, Show};
use crossterm::style::{Attribute, ContentStyle, Print, PrintStyledContent, StyledContent};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::tui::component::Prompt;
use crate::tui::theme;

/// Reports the terminal height in rows, if known.
pub type RowQuery = Box<dyn Fn() -> Option<u16>>;

/// What a prompt wants on screen, built fresh for every render.
#[derive(Debug, Default)]
pub struct Frame {
    lines: Vec<Line<'static>>,
    rows: Option<u16>,
    cursor_back: usize,
}

impl Frame {
    pub fn new(rows: Option<u16>) -> Self {
        Self {
            lines: Vec::new(),
            rows,
            cursor_back: 0,
        }
    }

    /// Terminal height at render time, for prompts that size themselves.
    pub fn rows(&self) -> Option<u16> {
        self.rows
    }

    pub fn push(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    /// Leave the terminal cursor this many columns left of the end of the last line.
    pub fn set_cursor_back(&mut self, columns: usize) {
        self.cursor_back = columns;
    }

    pub fn cursor_back(&self) -> usize {
        self.cursor_back
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// The frame's lines as plain text.
    pub fn text(&self) -> Vec<String> {
        self.lines.iter().map(theme::plain).collect()
    }
}

pub struct Screen {
    out: Box<dyn Write>,
    rows: Option<RowQuery>,
    /// Rows below the first one occupied by the last draw.
    printed: usize,
}

impl Screen {
    pub fn new(out: Box<dyn Write>, rows: Option<RowQuery>) -> Self {
        Self {
            out,
            rows,
            printed: 0,
        }
    }

    /// Swap the sink. Anything drawn to the old one is forgotten.
    pub fn set_output(&mut self, out: Box<dyn Write>) {
        self.out = out;
        self.printed = 0;
    }

    pub fn rows(&self) -> Option<u16> {
        self.rows.as_ref().and_then(|query| query())
    }

    /// Number of line breaks the last draw emitted (what `clear` will undo).
    pub fn printed_lines(&self) -> usize {
        self.printed
    }

    /// Ask the prompt for a frame and draw it.
    pub fn render<P: Prompt>(&mut self, prompt: &mut P) -> io::Result<()> {
        let mut frame = Frame::new(self.rows());
        prompt.render(&mut frame);
        self.draw(&frame)
    }

    /// Erase the previous draw, then render again.
    pub fn redraw<P: Prompt>(&mut self, prompt: &mut P) -> io::Result<()> {
        self.clear()?;
        self.render(prompt)
    }

    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        for (index, line) in frame.lines().iter().enumerate() {
            if index > 0 {
                queue!(self.out, Print("\r\n"))?;
            }
            self.queue_line(line)?;
        }
        if frame.cursor_back() > 0 {
            let columns = u16::try_from(frame.cursor_back()).unwrap_or(u16::MAX);
            queue!(self.out, MoveLeft(columns))?;
        }
        self.out.flush()?;
        self.printed = frame.lines().len().saturating_sub(1);
        Ok(())
    }

    /// Erase exactly the rows printed by the last draw.
    pub fn clear(&mut self) -> io::Result<()> {
        for _ in 0..self.printed {
            queue!(self.out, Clear(ClearType::CurrentLine), MoveUp(1))?;
        }
        queue!(self.out, Clear(ClearType::CurrentLine), MoveToColumn(0))?;
        self.out.flush()?;
        self.printed = 0;
        Ok(())
    }

    /// Print a finished line. It is not tracked, so `clear` leaves it alone.
    pub fn println(&mut self, line: impl Into<Line<'static>>) -> io::Result<()> {
        let line = line.into();
        self.queue_line(&line)?;
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.out.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()
    }

    fn queue_line(&mut self, line: &Line<'_>) -> io::Result<()> {
        for span in &line.spans {
            let style = content_style(line.style.patch(span.style));
            queue!(
                self.out,
                PrintStyledContent(StyledContent::new(style, span.content.as_ref()))
            )?;
        }
        Ok(())
    }
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(crossterm_color);
    content.background_color = style.bg.map(crossterm_color);
    for (modifier, attribute) in [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::REVERSED, Attribute::Reverse),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ] {
        if style.add_modifier.contains(modifier) {
            content.attributes.set(attribute);
        }
    }
    content
}

fn crossterm_color(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as C;
    match color {
        Color::Reset => C::Reset,
        Color::Black => C::Black,
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Magenta => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::Gray => C::Grey,
        Color::DarkGray => C::DarkGrey,
        Color::LightRed => C::Red,
        Color::LightGreen => C::Green,
        Color::LightYellow => C::Yellow,
        Color::LightBlue => C::Blue,
        Color::LightMagenta => C::Magenta,
        Color::LightCyan => C::Cyan,
        Color::White => C::White,
        Color::Rgb(r, g, b) => C::Rgb { r, g, b },
        Color::Indexed(i) => C::AnsiValue(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CaptureBuffer;

    fn frame(lines: &[&'static str]) -> Frame {
        let mut frame = Frame::new(None);
        for line in lines {
            frame.push(*line);
        }
        frame
    }

    #[test]
    fn test_draw_records_line_count() {
        let capture = CaptureBuffer::default();
        let mut screen = Screen::new(Box::new(capture.clone()), None);
        screen.draw(&frame(&["? Pick", "a", "b"])).unwrap();
        assert_eq!(screen.printed_lines(), 2);
        assert_eq!(capture.contents().matches("\r\n").count(), 2);
    }

    #[test]
    fn test_clear_moves_up_once_per_printed_line() {
        let capture = CaptureBuffer::default();
        let mut screen = Screen::new(Box::new(capture.clone()), None);
        screen.draw(&frame(&["one", "two", "three", "four"])).unwrap();
        capture.reset();
        screen.clear().unwrap();
        let out = capture.contents();
        assert_eq!(out.matches("\x1b[1A").count(), 3);
        assert_eq!(out.matches("\x1b[2K").count(), 4);
        assert_eq!(screen.printed_lines(), 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let capture = CaptureBuffer::default();
        let mut screen = Screen::new(Box::new(capture.clone()), None);
        screen.draw(&frame(&["one", "two"])).unwrap();
        screen.clear().unwrap();
        capture.reset();
        screen.clear().unwrap();
        assert_eq!(capture.contents().matches("\x1b[1A").count(), 0);
    }

    #[test]
    fn test_println_is_not_tracked() {
        let capture = CaptureBuffer::default();
        let mut screen = Screen::new(Box::new(capture.clone()), None);
        screen.println("done").unwrap();
        assert_eq!(screen.printed_lines(), 0);
        assert!(capture.contents().contains("done"));
    }

    #[test]
    fn test_cursor_back_moves_left() {
        let capture = CaptureBuffer::default();
        let mut screen = Screen::new(Box::new(capture.clone()), None);
        let mut f = frame(&["? Name abc"]);
        f.set_cursor_back(2);
        screen.draw(&f).unwrap();
        assert!(capture.contents().ends_with("\x1b[2D"));
    }

    #[test]
    fn test_rows_query_is_consulted() {
        let screen = Screen::new(Box::new(CaptureBuffer::default()), Some(Box::new(|| Some(24))));
        assert_eq!(screen.rows(), Some(24));
        let screen = Screen::new(Box::new(CaptureBuffer::default()), None);
        assert_eq!(screen.rows(), None);
    }

    #[test]
    fn test_content_style_maps_color_and_bold() {
        let style = content_style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD));
        assert_eq!(style.foreground_color, Some(crossterm::style::Color::Blue));
        assert!(style.attributes.has(Attribute::Bold));
    }
}
