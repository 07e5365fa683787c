use std::io;

use crate::core::key_combo::{ComboError, KeyCombo};
use crate::core::keypress::Keypress;
use crate::tui::screen::{Frame, Screen};

/// What a key handler decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<R> {
    /// Keep reading keys. The handler has already redrawn if it needed to.
    Continue,
    /// The prompt is answered.
    Resolve(R),
}

/// A key handler: mutates the prompt, optionally redraws, reports a `Step`.
pub type Action<P> = fn(&mut P, &mut Screen) -> io::Result<Step<<P as Prompt>::Output>>;

/// One or more key combos bound to an action. The first matching binding wins.
pub struct Binding<P: Prompt> {
    combos: Vec<KeyCombo>,
    action: Action<P>,
}

impl<P: Prompt> Binding<P> {
    /// Bind `action` to every combo in `combos` (parsed with `KeyCombo::parse`).
    pub fn new(combos: &[&str], action: Action<P>) -> Result<Self, ComboError> {
        let combos = combos
            .iter()
            .map(|combo| KeyCombo::parse(combo))
            .collect::<Result<_, _>>()?;
        Ok(Self { combos, action })
    }

    pub fn matches(&self, key: &Keypress) -> bool {
        self.combos.iter().any(|combo| combo.test(key))
    }

    pub fn combos(&self) -> &[KeyCombo] {
        &self.combos
    }

    pub fn invoke(&self, prompt: &mut P, screen: &mut Screen) -> io::Result<Step<P::Output>> {
        (self.action)(prompt, screen)
    }
}

/// A question the render loop can drive.
///
/// # Mutability
///
/// `render` takes `&mut self` so prompts can update presentation state
/// (e.g. the viewport's window size against the terminal height) during
/// the render pass.
pub trait Prompt: Sized {
    type Output;

    fn label(&self) -> &str;

    /// Describe the current state as lines in `frame`.
    fn render(&mut self, frame: &mut Frame);

    /// Key bindings, checked in order. Called once per prompt run.
    fn bindings(&self) -> Result<Vec<Binding<Self>>, ComboError>;

    /// Receives keys no binding matched. Ignores them unless overridden.
    fn default_action(
        &mut self,
        _key: &Keypress,
        _screen: &mut Screen,
    ) -> io::Result<Step<Self::Output>> {
        Ok(Step::Continue)
    }

    /// Runs once before the first render.
    fn setup(&mut self, _screen: &mut Screen) -> io::Result<()> {
        Ok(())
    }

    /// Runs once when the prompt ends, however it ends.
    fn teardown(&mut self, _screen: &mut Screen) -> io::Result<()> {
        Ok(())
    }
}
