//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::core::keypress::Keypress;
use crate::tui::component::Prompt;
use crate::tui::event::ReplayKeys;
use crate::tui::render::{Outcome, PromptError, RenderLoop};
use crate::tui::screen::{Frame, Screen};

/// A cloneable in-memory sink; every clone sees the same bytes.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn reset(&self) {
        self.bytes.lock().unwrap().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A screen with no height limit that writes into the returned buffer.
pub fn capture_screen() -> (Screen, CaptureBuffer) {
    let capture = CaptureBuffer::default();
    (Screen::new(Box::new(capture.clone()), None), capture)
}

/// Render a prompt once and return its lines as plain text.
pub fn render_text<P: Prompt>(prompt: &mut P) -> Vec<String> {
    let mut frame = Frame::new(None);
    prompt.render(&mut frame);
    frame.text()
}

/// One printable keypress per character.
pub fn type_text(text: &str) -> Vec<Keypress> {
    text.chars().map(Keypress::char).collect()
}

/// Drive a prompt through the default render loop with scripted keys.
pub fn run_prompt<P: Prompt>(
    mut prompt: P,
    keys: impl IntoIterator<Item = Keypress>,
) -> (Result<Outcome<P::Output>, PromptError>, CaptureBuffer) {
    let (mut screen, capture) = capture_screen();
    let mut keys = ReplayKeys::new(keys);
    let outcome = tokio_test::block_on(RenderLoop::default().run(&mut prompt, &mut keys, &mut screen));
    (outcome, capture)
}
