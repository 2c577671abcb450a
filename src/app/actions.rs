//! Side effects requested by the event handler.
//!
//! The handler never sleeps or touches the clipboard itself. It returns
//! [`Action`]s and the runtime performs them, posting the outcome back as
//! events.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Cancel the pending search timer and start a new one.
    ///
    /// When it elapses the runtime posts `Event::SearchTimerFired { generation }`.
    ScheduleSearch { generation: u64, delay: Duration },

    /// Write the citation text to the clipboard.
    ///
    /// The runtime posts `Event::CopyFinished` with the outcome.
    WriteClipboard(String),

    /// Revert the "Copied!" label after `delay`.
    ///
    /// When it elapses the runtime posts `Event::CopyLabelExpired { generation }`.
    ScheduleCopyReset { generation: u64, delay: Duration },
}
