use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;

use crate::core::keypress::Keypress;

/// A lazy, sequential stream of key events.
///
/// `Ok(None)` means the stream has ended and no more keys will arrive.
/// Prompts are single-threaded, so implementations need not be `Send`.
#[async_trait(?Send)]
pub trait KeySource {
    async fn next_key(&mut self) -> io::Result<Option<Keypress>>;
}

/// Keys read from the real terminal through crossterm's event stream.
///
/// Raw mode must be enabled for keys to arrive one at a time.
pub struct CrosstermKeys {
    events: EventStream,
}

impl CrosstermKeys {
    pub fn new() -> Self {
        Self {
            events: EventStream::new(),
        }
    }
}

impl Default for CrosstermKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl KeySource for CrosstermKeys {
    async fn next_key(&mut self) -> io::Result<Option<Keypress>> {
        while let Some(event) = self.events.next().await {
            match event? {
                Event::Key(key_event) => {
                    log::debug!(
                        "Key event: {:?} with modifiers {:?}",
                        key_event.code,
                        key_event.modifiers
                    );
                    if let Some(keypress) = translate(&key_event) {
                        return Ok(Some(keypress));
                    }
                }
                // The next render re-reads the terminal height
                Event::Resize(cols, rows) => log::debug!("Terminal resized to {cols}x{rows}"),
                _ => {}
            }
        }
        Ok(None)
    }
}

/// A scripted sequence of keys, for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct ReplayKeys {
    keys: VecDeque<Keypress>,
}

impl ReplayKeys {
    pub fn new(keys: impl IntoIterator<Item = Keypress>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Number of keys not yet delivered.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

#[async_trait(?Send)]
impl KeySource for ReplayKeys {
    async fn next_key(&mut self) -> io::Result<Option<Keypress>> {
        Ok(self.keys.pop_front())
    }
}

/// Convert a crossterm key event into a `Keypress`.
///
/// Releases and unnamed keys (media, lone modifiers) are dropped. So are
/// Alt-modified keys: no combo can ask for Alt, and Alt+x must not type `x`.
pub fn translate(event: &KeyEvent) -> Option<Keypress> {
    if event.kind == KeyEventKind::Release || event.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    let mut keypress = match event.code {
        KeyCode::Char(c) => Keypress::char(c),
        KeyCode::Enter => Keypress::named("enter"),
        KeyCode::Esc => Keypress::named("escape"),
        KeyCode::Backspace => Keypress::named("backspace"),
        KeyCode::Delete => Keypress::named("delete"),
        KeyCode::Insert => Keypress::named("insert"),
        KeyCode::Left => Keypress::named("left"),
        KeyCode::Right => Keypress::named("right"),
        KeyCode::Up => Keypress::named("up"),
        KeyCode::Down => Keypress::named("down"),
        KeyCode::Home => Keypress::named("home"),
        KeyCode::End => Keypress::named("end"),
        KeyCode::PageUp => Keypress::named("pageup"),
        KeyCode::PageDown => Keypress::named("pagedown"),
        KeyCode::Tab => Keypress::named("tab"),
        KeyCode::BackTab => Keypress::named("tab").with_shift(),
        KeyCode::F(n) => Keypress::named(format!("f{n}")),
        _ => return None,
    };
    let modifiers = event.modifiers;
    keypress.ctrl = modifiers.contains(KeyModifiers::CONTROL);
    keypress.meta = modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META);
    keypress.shift |= modifiers.contains(KeyModifiers::SHIFT);
    Some(keypress)
}
