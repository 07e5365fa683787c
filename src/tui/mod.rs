//! # TUI Adapter
//!
//! The crossterm-specific layer. Reads keys, draws prompts inline below the
//! shell cursor, and hands answers back to the caller.
//!
//! This is the only module that knows about crossterm and ratatui styling;
//! `core` stays pure.
//!
//! ## Capabilities
//!
//! A `Terminal` is built from explicit capabilities: a `KeySource`, an
//! output sink, and an optional terminal-height query. `Terminal::stdio`
//! wires up the real terminal; tests inject `ReplayKeys` and a capture
//! buffer instead.
//!
//! ## Raw Mode
//!
//! Keys must arrive one at a time, so the stdio terminal enables raw mode
//! for the duration of each prompt. The guard restores cooked mode on drop,
//! including when the prompt fails.

pub mod component;
pub mod components;
pub mod event;
pub mod render;
pub mod screen;
pub mod theme;

use std::io::{self, Write};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, info};
use serde::Serialize;

use crate::core::choice::Choice;
use crate::core::config::ResolvedConfig;
use crate::tui::component::Prompt;
use crate::tui::components::{
    CheckboxPrompt, ConfirmPrompt, InputPrompt, ListPrompt, ListSettings, Mask, PasswordPrompt,
};
use crate::tui::event::{CrosstermKeys, KeySource};
use crate::tui::render::{Outcome, PromptError, RenderLoop};
use crate::tui::screen::{RowQuery, Screen};

/// The result of asking one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Answer<T> {
    Answered(T),
    /// There was nothing to choose from; no prompt was shown.
    Empty,
    Cancelled,
}

impl<T> Answer<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Answer::Answered(value) => Some(value),
            Answer::Empty | Answer::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Answer::Cancelled)
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        debug!("Raw mode enabled");
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub struct Terminal {
    keys: Box<dyn KeySource>,
    screen: Screen,
    render_loop: RenderLoop,
    settings: ListSettings,
    raw_mode: bool,
    exit_on_force: bool,
}

impl Terminal {
    /// Prompts on the process terminal: crossterm keys, stdout, real height.
    pub fn stdio(config: &ResolvedConfig) -> Self {
        let rows: RowQuery = Box::new(|| crossterm::terminal::size().ok().map(|(_, rows)| rows));
        let mut terminal = Self::new(
            Box::new(CrosstermKeys::new()),
            Box::new(io::stdout()),
            Some(rows),
            config,
        );
        terminal.raw_mode = true;
        terminal.exit_on_force = true;
        terminal
    }

    /// Prompts over injected capabilities. Raw mode is left alone and force
    /// exit is reported as `PromptError::ForcedExit`.
    pub fn new(
        keys: Box<dyn KeySource>,
        out: Box<dyn Write>,
        rows: Option<RowQuery>,
        config: &ResolvedConfig,
    ) -> Self {
        Self {
            keys,
            screen: Screen::new(out, rows),
            render_loop: RenderLoop::new(config.cancel.clone(), config.force_exit.clone()),
            settings: ListSettings::from(config),
            raw_mode: false,
            exit_on_force: false,
        }
    }

    /// Draw somewhere else, e.g. stderr so stdout stays clean for answers.
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.screen.set_output(out);
        self
    }

    /// Whether the force-exit key terminates the process.
    pub fn exit_on_force(mut self, exit: bool) -> Self {
        self.exit_on_force = exit;
        self
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    /// Run any prompt to completion.
    pub async fn ask<P: Prompt>(&mut self, prompt: &mut P) -> Result<Answer<P::Output>, PromptError> {
        info!("Asking {:?}", prompt.label());
        let guard = if self.raw_mode {
            Some(RawModeGuard::new()?)
        } else {
            None
        };
        let outcome = self
            .render_loop
            .run(prompt, self.keys.as_mut(), &mut self.screen)
            .await;
        drop(guard);

        match outcome? {
            Outcome::Resolved(answer) => Ok(Answer::Answered(answer)),
            Outcome::Cancelled => {
                info!("{:?} cancelled", prompt.label());
                Ok(Answer::Cancelled)
            }
            Outcome::ForceExit => {
                if self.exit_on_force {
                    info!("Force exit from {:?}", prompt.label());
                    std::process::exit(0);
                }
                Err(PromptError::ForcedExit)
            }
        }
    }

    /// Pick one choice. An empty list answers `Empty` without prompting.
    pub async fn list<T>(&mut self, label: &str, choices: Vec<Choice<T>>) -> Result<Answer<T>, PromptError> {
        let Some(mut prompt) = ListPrompt::new(label, choices, &self.settings) else {
            debug!("No choices for {label:?}, skipping prompt");
            return Ok(Answer::Empty);
        };
        self.ask(&mut prompt).await
    }

    /// Pick any number of choices. An empty list answers an empty selection
    /// without prompting.
    pub async fn checkbox<T>(
        &mut self,
        label: &str,
        choices: Vec<Choice<T>>,
    ) -> Result<Answer<Vec<T>>, PromptError> {
        let Some(mut prompt) = CheckboxPrompt::new(label, choices, &self.settings) else {
            debug!("No choices for {label:?}, skipping prompt");
            return Ok(Answer::Answered(Vec::new()));
        };
        self.ask(&mut prompt).await
    }

    pub async fn input(&mut self, label: &str, default: Option<&str>) -> Result<Answer<String>, PromptError> {
        let mut prompt = InputPrompt::new(label, default.map(str::to_string));
        self.ask(&mut prompt).await
    }

    pub async fn confirm(&mut self, label: &str, default: Option<bool>) -> Result<Answer<bool>, PromptError> {
        let mut prompt = ConfirmPrompt::new(label, default);
        self.ask(&mut prompt).await
    }

    pub async fn password(&mut self, label: &str, mask: Mask) -> Result<Answer<String>, PromptError> {
        let mut prompt = PasswordPrompt::new(label, mask);
        self.ask(&mut prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_serializes_with_status_tag() {
        let answered = serde_json::to_value(Answer::Answered(vec!["a"])).unwrap();
        assert_eq!(answered, serde_json::json!({"status": "answered", "value": ["a"]}));
        let cancelled = serde_json::to_value(Answer::<String>::Cancelled).unwrap();
        assert_eq!(cancelled, serde_json::json!({"status": "cancelled"}));
    }

    #[test]
    fn test_answer_into_option() {
        assert_eq!(Answer::Answered(3).into_option(), Some(3));
        assert_eq!(Answer::<u8>::Empty.into_option(), None);
        assert!(Answer::<u8>::Cancelled.is_cancelled());
    }
}
