//! # Core Prompt Logic
//!
//! Everything a prompt decides, independent of how it is drawn.
//! It knows nothing about crossterm, ratatui or the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • KeyCombo (matching)  │
//!                    │  • Viewport (scrolling) │
//!                    │  • SelectionGraph       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │(crossterm) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`keypress`]: The `Keypress` struct, the input every prompt reacts to
//! - [`key_combo`]: `KeyCombo` parsing and matching
//! - [`viewport`]: The scrolling window used by list-style prompts
//! - [`choice`]: Options offered by list and checkbox prompts
//! - [`selection`]: Dependency-aware multi-selection
//! - [`config`]: Layered settings (file, env, CLI)

pub mod choice;
pub mod config;
pub mod key_combo;
pub mod keypress;
pub mod selection;
pub mod viewport;
