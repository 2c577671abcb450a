//! Event loop for one page.
//!
//! [`PageRuntime`] owns the page state, the host surface and the clipboard.
//! It feeds events through [`handle_event`], performs the returned actions and
//! re-renders when asked to. Deferred work (the search debounce and the
//! "Copied!" label reset) runs as tokio tasks that post their event back on
//! the runtime's channel; a newer timer aborts the older one.
//!
//! All methods that perform actions spawn tasks and must be called from
//! within a tokio runtime.

use super::handler::{handle_event, Event};
use super::modes::PageStatus;
use super::{Action, PageState};
use crate::domain::error::{Result, SiteError};
use crate::source::{DataSource, Fetcher};
use crate::ui::{self, Card, Surface};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Clipboard write capability offered by the host.
pub trait Clipboard: Send {
    /// # Errors
    ///
    /// Returns [`SiteError::Clipboard`] when the capability is missing or denied.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// A host without clipboard access. Every copy takes the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(SiteError::Clipboard("clipboard is not available".to_string()))
    }
}

/// Clipboard held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    /// Simulates a permission prompt the user rejected.
    pub denied: bool,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.denied {
            return Err(SiteError::Clipboard("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Drives a single list page.
pub struct PageRuntime<I: Card, S: Surface, C: Clipboard> {
    state: PageState<I>,
    surface: S,
    clipboard: C,
    tx: UnboundedSender<Event<I>>,
    rx: UnboundedReceiver<Event<I>>,
    search_timer: Option<JoinHandle<()>>,
    copy_timer: Option<JoinHandle<()>>,
}

impl<I: Card, S: Surface, C: Clipboard> PageRuntime<I, S, C> {
    pub fn new(state: PageState<I>, surface: S, clipboard: C) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            surface,
            clipboard,
            tx,
            rx,
            search_timer: None,
            copy_timer: None,
        }
    }

    pub const fn state(&self) -> &PageState<I> {
        &self.state
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Handle for posting events from elsewhere, e.g. a host input task.
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<Event<I>> {
        self.tx.clone()
    }

    /// Runs the page's one and only load: `Loading`, fetch, then `Loaded` or `LoadFailed`.
    pub async fn load<F: Fetcher>(&mut self, source: &DataSource<F>) {
        if self.state.status != PageStatus::Unloaded {
            tracing::warn!(status = ?self.state.status, "page already loading or loaded, not fetching");
            return;
        }
        let span = tracing::debug_span!("page_load", collection = I::COLLECTION);
        span.in_scope(|| self.dispatch(Event::LoadStarted));
        let report = source.load::<I>().instrument(span.clone()).await;
        span.in_scope(|| self.dispatch(Event::Loaded(report)));
    }

    /// Handles one event immediately. Rejected events are logged and dropped.
    pub fn dispatch(&mut self, mut event: Event<I>) {
        match handle_event(&mut self.state, &mut event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.perform(action);
                }
                if should_render {
                    self.render();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, event = ?event, "event rejected");
            }
        }
    }

    fn perform(&mut self, action: Action) {
        tracing::debug!(action = ?action, "performing action");
        match action {
            Action::ScheduleSearch { generation, delay } => {
                let timer = self.schedule(delay, Event::SearchTimerFired { generation });
                if let Some(previous) = self.search_timer.replace(timer) {
                    previous.abort();
                }
            }
            Action::WriteClipboard(text) => {
                let result = self.clipboard.write_text(&text);
                self.post(Event::CopyFinished(result));
            }
            Action::ScheduleCopyReset { generation, delay } => {
                let timer = self.schedule(delay, Event::CopyLabelExpired { generation });
                if let Some(previous) = self.copy_timer.replace(timer) {
                    previous.abort();
                }
            }
        }
    }

    fn schedule(&self, delay: Duration, event: Event<I>) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver only goes away with the runtime.
            let _ = tx.send(event);
        })
    }

    fn post(&self, event: Event<I>) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(event = ?e.0, "event channel closed");
        }
    }

    /// Recomputes the view model and writes it to the surface.
    pub fn render(&mut self) {
        let vm = self.state.compute_viewmodel();
        ui::render(&mut self.surface, &vm);
    }

    /// Waits for the next posted event and handles it.
    pub async fn step(&mut self) {
        if let Some(event) = self.rx.recv().await {
            self.dispatch(event);
        }
    }

    /// Handles every event already posted, without waiting. Returns how many ran.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Lets a pending search apply, then handles everything posted.
    ///
    /// The copy-label timer is not awaited.
    pub async fn settle(&mut self) {
        if let Some(timer) = self.search_timer.take() {
            if let Err(e) = timer.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "search timer task failed");
                }
            }
        }
        self.drain();
    }
}

impl<I: Card, S: Surface, C: Clipboard> Drop for PageRuntime<I, S, C> {
    fn drop(&mut self) {
        for timer in [self.search_timer.take(), self.copy_timer.take()].into_iter().flatten() {
            timer.abort();
        }
    }
}

impl<I: Card, S: Surface + std::fmt::Debug, C: Clipboard + std::fmt::Debug> std::fmt::Debug
    for PageRuntime<I, S, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRuntime")
            .field("state", &self.state)
            .field("surface", &self.surface)
            .field("clipboard", &self.clipboard)
            .field("search_timer_pending", &self.search_timer.is_some())
            .field("copy_timer_pending", &self.copy_timer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::{CopyStatus, PageStatus};
    use crate::app::PageSettings;
    use crate::domain::Publication;
    use crate::source::MemoryFetcher;
    use crate::ui::{Document, Taxonomy};
    use futures_util::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PUBLICATIONS: &str = r#"{"publications": [
        {"id": "a", "title": "Alpha", "year": 2023, "type": "journal", "bibtex": "@article{a}"},
        {"id": "b", "title": "Beta", "year": 2021, "type": "conference"}
    ]}"#;

    fn runtime<C: Clipboard>(clipboard: C) -> PageRuntime<Publication, Document, C> {
        let state = PageState::new(Taxonomy::builtin(), PageSettings::default());
        let document = Document::with_regions([
            "publications-container",
            "no-results",
            "bibtex-modal",
            "bibtex-content",
            "copy-bibtex",
            "copy-fallback",
        ]);
        PageRuntime::new(state, document, clipboard)
    }

    async fn loaded<C: Clipboard>(clipboard: C) -> PageRuntime<Publication, Document, C> {
        let mut rt = runtime(clipboard);
        let source = DataSource::new(MemoryFetcher::new().with("data/publications.json", PUBLICATIONS));
        rt.load(&source).await;
        rt
    }

    #[tokio::test]
    async fn load_renders_cards() {
        let rt = loaded(UnavailableClipboard).await;
        assert_eq!(rt.state().status, PageStatus::Loaded);
        assert!(rt.surface().html("publications-container").contains("Alpha"));
        assert!(rt.surface().is_hidden("no-results"));
    }

    #[tokio::test]
    async fn copy_writes_clipboard() {
        let mut rt = loaded(MemoryClipboard::default()).await;
        rt.dispatch(Event::ShowCitation { id: "a".into() });
        rt.dispatch(Event::CopyCitation);
        assert_eq!(rt.drain(), 1);
        assert_eq!(rt.clipboard().contents.as_deref(), Some("@article{a}"));
        assert_eq!(rt.state().citation.copy, CopyStatus::Copied);
        assert_eq!(rt.surface().html("copy-bibtex"), "Copied!");
    }

    #[tokio::test]
    async fn unavailable_clipboard_shows_fallback() {
        let mut rt = loaded(UnavailableClipboard).await;
        rt.dispatch(Event::ShowCitation { id: "a".into() });
        rt.dispatch(Event::CopyCitation);
        rt.drain();
        assert_eq!(rt.state().citation.copy, CopyStatus::Failed);
        assert!(!rt.surface().is_hidden("copy-fallback"));
    }

    #[tokio::test]
    async fn rejected_events_leave_page_untouched() {
        let mut rt = loaded(UnavailableClipboard).await;
        let before = rt.surface().clone();
        rt.dispatch(Event::SelectFilter { field: "venue".into(), value: "x".into() });
        assert_eq!(rt.surface(), &before);
    }

    struct CountingFetcher {
        inner: MemoryFetcher,
        calls: AtomicUsize,
    }

    impl Fetcher for CountingFetcher {
        fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(path)
        }
    }

    #[tokio::test]
    async fn second_load_does_not_fetch() {
        let source = DataSource::new(CountingFetcher {
            inner: MemoryFetcher::new().with("data/publications.json", PUBLICATIONS),
            calls: AtomicUsize::new(0),
        });
        let mut rt = runtime(UnavailableClipboard);
        rt.load(&source).await;
        rt.load(&source).await;
        assert_eq!(source.fetcher().calls.load(Ordering::SeqCst), 1);
        assert_eq!(rt.state().status, PageStatus::Loaded);
        assert_eq!(rt.state().view.visible_len(), 2);
    }
}
