//! Page lifecycle and transient UI state types.
//!
//! # State Machine
//!
//! ```text
//! Unloaded ──LoadStarted──▶ Loading ──Loaded(ok)───▶ Loaded ◀─┐
//!                                   └─Loaded(failed)─▶ LoadFailed  │ criteria → recompute → render
//!                                                              └──┘
//! ```
//!
//! `LoadFailed` is terminal: there is no retry, the page has to be reloaded.

/// Lifecycle of a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStatus {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    LoadFailed,
}

impl PageStatus {
    /// Whether the collection has been received, successfully or not.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::LoadFailed)
    }
}

/// State of the citation panel's copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyStatus {
    #[default]
    Idle,
    /// The citation is being written to the clipboard.
    Pending,
    /// Last copy succeeded; the label reverts after a delay.
    Copied,
    /// Last copy failed; the manual-copy hint is shown.
    Failed,
}

impl CopyStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copied => "Copied!",
            Self::Idle | Self::Pending | Self::Failed => "Copy",
        }
    }
}
