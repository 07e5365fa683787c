//! # Render Loop
//!
//! Drives one prompt from first render to answer.
//!
//! ```text
//!  setup → render ─┐
//!                  ▼
//!        ┌──► await next key ───────────── (the only suspension point)
//!        │         │
//!        │   cancel combo?  ── clear, teardown, "<cancel>" ──► Cancelled
//!        │   exit combo?    ── clear, teardown, "<exit>"   ──► ForceExit
//!        │   binding match? ─┐
//!        │   default action ─┤
//!        │                   ▼
//!        └──────────── Step::Continue      Step::Resolve(v) ── teardown ──► Resolved(v)
//! ```
//!
//! The loop never redraws on its own: a handler that changed visible state
//! calls `Screen::redraw` before returning.

use std::fmt;
use std::io;

use log::{debug, info};

use crate::core::key_combo::{ComboError, KeyCombo};
use crate::tui::component::{Prompt, Step};
use crate::tui::event::KeySource;
use crate::tui::screen::Screen;
use crate::tui::theme;

/// How a prompt run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    Resolved(R),
    Cancelled,
    /// The force-exit combo was pressed; the caller should terminate.
    ForceExit,
}

#[derive(Debug)]
pub enum PromptError {
    /// Writing to the screen or reading keys failed.
    Io(io::Error),
    /// A binding used a key combo that cannot be matched.
    Combo(ComboError),
    /// A prompt kind tag that names no prompt.
    UnknownKind(String),
    /// The key source ended before the prompt was answered.
    InputClosed,
    /// Force exit was requested on a terminal that does not exit the process.
    ForcedExit,
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Io(e) => write!(f, "terminal I/O error: {e}"),
            PromptError::Combo(e) => write!(f, "invalid key binding: {e}"),
            PromptError::UnknownKind(kind) => write!(f, "unsupported prompt type: {kind}"),
            PromptError::InputClosed => write!(f, "key input closed before the prompt was answered"),
            PromptError::ForcedExit => write!(f, "prompt force-exited"),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Io(e) => Some(e),
            PromptError::Combo(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::Io(e)
    }
}

impl From<ComboError> for PromptError {
    fn from(e: ComboError) -> Self {
        PromptError::Combo(e)
    }
}

/// The built-in interrupts, checked before any prompt binding.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    cancel: KeyCombo,
    force_exit: KeyCombo,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(
            KeyCombo::new(true, false, false, "c"),
            KeyCombo::new(true, false, false, "d"),
        )
    }
}

impl RenderLoop {
    pub fn new(cancel: KeyCombo, force_exit: KeyCombo) -> Self {
        Self { cancel, force_exit }
    }

    pub async fn run<P: Prompt>(
        &self,
        prompt: &mut P,
        keys: &mut dyn KeySource,
        screen: &mut Screen,
    ) -> Result<Outcome<P::Output>, PromptError> {
        // Bad bindings are a setup error: report them before drawing anything.
        let bindings = prompt.bindings()?;

        prompt.setup(screen)?;
        screen.render(prompt)?;

        loop {
            let Some(key) = keys.next_key().await? else {
                info!("Key input closed while asking {:?}", prompt.label());
                screen.clear()?;
                prompt.teardown(screen)?;
                return Err(PromptError::InputClosed);
            };

            if self.cancel.test(&key) {
                debug!("Cancel requested");
                screen.clear()?;
                prompt.teardown(screen)?;
                screen.println(theme::summary(
                    prompt.label(),
                    vec![theme::highlight(theme::CANCEL_MARKER)],
                ))?;
                return Ok(Outcome::Cancelled);
            }

            if self.force_exit.test(&key) {
                debug!("Force exit requested");
                screen.clear()?;
                prompt.teardown(screen)?;
                screen.println(theme::summary(
                    prompt.label(),
                    vec![theme::highlight(theme::EXIT_MARKER)],
                ))?;
                return Ok(Outcome::ForceExit);
            }

            let step = match bindings.iter().position(|binding| binding.matches(&key)) {
                Some(index) => {
                    debug!("Key {:?} dispatched to binding {}", key.key, index);
                    bindings[index].invoke(prompt, screen)?
                }
                None => prompt.default_action(&key, screen)?,
            };

            if let Step::Resolve(answer) = step {
                prompt.teardown(screen)?;
                return Ok(Outcome::Resolved(answer));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keypress::Keypress;
    use crate::test_support::{CaptureBuffer, capture_screen};
    use crate::tui::component::Binding;
    use crate::tui::event::ReplayKeys;
    use crate::tui::screen::Frame;

    /// Counts up on "+", answers with the count on Enter, echoes typed digits.
    #[derive(Default)]
    struct Counter {
        count: u32,
        renders: usize,
        typed: String,
        torn_down: bool,
        set_up: bool,
    }

    impl Counter {
        fn bump(&mut self, screen: &mut Screen) -> io::Result<Step<u32>> {
            self.count += 1;
            screen.redraw(self)?;
            Ok(Step::Continue)
        }

        fn submit(&mut self, _screen: &mut Screen) -> io::Result<Step<u32>> {
            Ok(Step::Resolve(self.count))
        }
    }

    impl Prompt for Counter {
        type Output = u32;

        fn label(&self) -> &str {
            "Count"
        }

        fn render(&mut self, frame: &mut Frame) {
            self.renders += 1;
            frame.push(format!("count {}", self.count));
            frame.push(format!("typed {}", self.typed));
        }

        fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
            Ok(vec![
                Binding::new(&["plus", "up"], Self::bump)?,
                Binding::new(&["enter"], Self::submit)?,
            ])
        }

        fn default_action(&mut self, key: &Keypress, _screen: &mut Screen) -> io::Result<Step<u32>> {
            if let Some(text) = key.text() {
                self.typed.push_str(text);
            }
            Ok(Step::Continue)
        }

        fn setup(&mut self, _screen: &mut Screen) -> io::Result<()> {
            self.set_up = true;
            Ok(())
        }

        fn teardown(&mut self, _screen: &mut Screen) -> io::Result<()> {
            self.torn_down = true;
            Ok(())
        }
    }

    fn run(counter: &mut Counter, keys: Vec<Keypress>) -> (Result<Outcome<u32>, PromptError>, CaptureBuffer) {
        let (mut screen, capture) = capture_screen();
        let mut keys = ReplayKeys::new(keys);
        let outcome = tokio_test::block_on(RenderLoop::default().run(counter, &mut keys, &mut screen));
        (outcome, capture)
    }

    #[test]
    fn test_bindings_dispatch_and_resolve() {
        let mut counter = Counter::default();
        let (outcome, _) = run(
            &mut counter,
            vec![Keypress::char('+'), Keypress::named("up"), Keypress::named("enter")],
        );
        assert_eq!(outcome.unwrap(), Outcome::Resolved(2));
        assert!(counter.set_up && counter.torn_down);
        // Initial render plus one per handled bump.
        assert_eq!(counter.renders, 3);
    }

    #[test]
    fn test_unmatched_keys_reach_default_action_without_redraw() {
        let mut counter = Counter::default();
        let (outcome, _) = run(
            &mut counter,
            vec![Keypress::char('4'), Keypress::char('2'), Keypress::named("enter")],
        );
        assert_eq!(outcome.unwrap(), Outcome::Resolved(0));
        assert_eq!(counter.typed, "42");
        assert_eq!(counter.renders, 1);
    }

    #[test]
    fn test_cancel_returns_cancelled_and_prints_marker() {
        let mut counter = Counter::default();
        let (outcome, capture) = run(
            &mut counter,
            vec![Keypress::named("up"), Keypress::char('c').with_ctrl(), Keypress::named("enter")],
        );
        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
        assert!(counter.torn_down);
        assert!(capture.contents().contains("<cancel>"));
    }

    #[test]
    fn test_force_exit_is_distinct_from_cancel() {
        let mut counter = Counter::default();
        let (outcome, capture) = run(&mut counter, vec![Keypress::char('d').with_ctrl()]);
        assert_eq!(outcome.unwrap(), Outcome::ForceExit);
        assert!(counter.torn_down);
        assert!(capture.contents().contains("<exit>"));
    }

    #[test]
    fn test_cancel_is_checked_before_bindings() {
        struct Greedy;
        impl Prompt for Greedy {
            type Output = ();
            fn label(&self) -> &str {
                "Greedy"
            }
            fn render(&mut self, frame: &mut Frame) {
                frame.push("greedy");
            }
            fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
                Ok(vec![Binding::new(&["Ctrl"], |_, _| Ok(Step::Resolve(())))?])
            }
        }
        let (mut screen, _) = capture_screen();
        let mut keys = ReplayKeys::new([Keypress::char('c').with_ctrl()]);
        let outcome = tokio_test::block_on(RenderLoop::default().run(&mut Greedy, &mut keys, &mut screen));
        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut counter = Counter::default();
        let (outcome, _) = run(&mut counter, vec![Keypress::named("up")]);
        assert!(matches!(outcome, Err(PromptError::InputClosed)));
        assert!(counter.torn_down);
    }

    #[test]
    fn test_bad_binding_fails_before_rendering() {
        struct AltBound;
        impl Prompt for AltBound {
            type Output = ();
            fn label(&self) -> &str {
                "Alt"
            }
            fn render(&mut self, frame: &mut Frame) {
                frame.push("never drawn");
            }
            fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError> {
                Ok(vec![Binding::new(&["Alt+x"], |_, _| Ok(Step::Continue))?])
            }
        }
        let (mut screen, capture) = capture_screen();
        let mut keys = ReplayKeys::default();
        let outcome = tokio_test::block_on(RenderLoop::default().run(&mut AltBound, &mut keys, &mut screen));
        assert!(matches!(outcome, Err(PromptError::Combo(_))));
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn test_custom_interrupt_keys() {
        let render_loop = RenderLoop::new(
            KeyCombo::parse("Esc").unwrap(),
            KeyCombo::parse("Ctrl+q").unwrap(),
        );
        let mut counter = Counter::default();
        let (mut screen, _) = capture_screen();
        let mut keys = ReplayKeys::new([Keypress::char('c').with_ctrl(), Keypress::named("escape")]);
        let outcome = tokio_test::block_on(render_loop.run(&mut counter, &mut keys, &mut screen));
        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
    }
}
