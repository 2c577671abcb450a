//! Application layer: the per-page controller.
//!
//! Sits between the host shim (main.rs) and the view/source/ui layers. It
//! follows a unidirectional data flow:
//!
//! ```text
//! Host input → Events → handle_event → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── Timer / Clipboard ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Generation-counted timers
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Page lifecycle and copy-button states
//! - [`nav`]: Mobile menu and anchor links
//! - [`runtime`]: Event loop, timers and clipboard
//! - [`state`]: Page state container and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod nav;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use modes::{CopyStatus, PageStatus};
pub use nav::{anchor_target, MenuState, NavEvent};
pub use runtime::{Clipboard, MemoryClipboard, PageRuntime, UnavailableClipboard};
pub use state::{CitationPanel, PageSettings, PageState, COPY_FALLBACK};
