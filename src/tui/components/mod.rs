//! # Prompt Components
//!
//! One file per prompt kind, plus the two building blocks they share.
//!
//! ## Component Architecture
//!
//! ### Building Blocks
//!
//! - `ScrollList`: windowed item list with "more above/below" indicators
//!   and the navigation bindings. Used by `ListPrompt` and `CheckboxPrompt`.
//! - `LineEditor`: single-line text buffer with a character-aware cursor
//!   and the editing bindings. Used by `InputPrompt`, `ConfirmPrompt` and
//!   `PasswordPrompt`.
//!
//! A prompt opts into a block's bindings through a small accessor trait
//! (`Scrollable`, `Editable`) and appends its own, usually just `Enter`.
//!
//! ### Co-location of Concerns
//!
//! Each prompt file holds its state, its rendering, its key handlers and
//! its tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── scroll_list.rs   (windowed list + navigation bindings)
//! ├── line_editor.rs   (text buffer + editing bindings)
//! ├── list.rs          (pick one)
//! ├── checkbox.rs      (pick many, with dependencies)
//! ├── input.rs         (free text)
//! ├── confirm.rs       (yes/no)
//! └── password.rs      (masked text)
//! ```

pub mod checkbox;
pub mod confirm;
pub mod input;
pub mod line_editor;
pub mod list;
pub mod password;
pub mod scroll_list;

pub use checkbox::CheckboxPrompt;
pub use confirm::ConfirmPrompt;
pub use input::InputPrompt;
pub use list::ListPrompt;
pub use password::{Mask, PasswordPrompt};
pub use scroll_list::ListSettings;
