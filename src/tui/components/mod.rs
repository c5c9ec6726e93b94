//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing backend and chat status
//! - `Message`: A single message bubble
//! - `Spinner`: Pending-response indicator
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `Transcript`: Message list, action bar and starter grid together
//! - `MessageList`: Scrollable conversation view with layout caching
//! - `ActionBar`: Reload / Stop buttons
//! - `StarterGrid`: Suggested first questions
//! - `Composer`: Single-line text input
//!
//! Stateful components are transient wrappers created every frame around a
//! `&mut State` that lives in [`crate::tui::TuiState`]. Props (messages,
//! flags, capabilities) are passed in as plain references.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── transcript.rs    (Composition of the chat view)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! ├── spinner.rs       (Pending indicator)
//! ├── action_bar.rs    (Reload / Stop)
//! ├── starter_grid.rs  (Starter questions)
//! └── composer.rs      (Text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod action_bar;
pub mod composer;
pub mod message;
pub mod message_list;
pub mod spinner;
pub mod starter_grid;
pub mod transcript;

pub use composer::{Composer, ComposerEvent};
pub use transcript::{Transcript, TranscriptEvent, TranscriptState};
