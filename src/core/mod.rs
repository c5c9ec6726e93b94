//! # Core Application Logic
//!
//! Chat state and the transcript view's decisions, independent of any UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ChatState + update() │
//!                    │  • TranscriptFlags      │
//!                    │  • StarterQuestions     │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │    API     │
//!             │  Adapter   │          │  (reqwest) │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `Role`, `NewMessage`
//! - [`transcript`]: derived flags for spinner, reload, stop, starters
//! - [`chat`]: `ChatState` and the `update()` reducer
//! - [`starters`]: starter question state and its fetch guard
//! - [`config`]: layered configuration

pub mod chat;
pub mod config;
pub mod message;
pub mod starters;
pub mod transcript;
