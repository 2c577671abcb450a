//! Event handling and state transition logic.
//!
//! [`handle_event`] is the controller: it maps one UI event onto the page
//! state and reports whether the page needs re-rendering plus the side effects
//! the runtime should perform.
//!
//! # Event Types
//!
//! - **Lifecycle**: `LoadStarted`, `Loaded`
//! - **Criteria**: `SearchInput` (debounced), `SelectFilter`, `Reset` (immediate)
//! - **Timers**: `SearchTimerFired`, `CopyLabelExpired`
//! - **Citation**: `ShowCitation`, `CloseCitation`, `CopyCitation`, `CopyFinished`
//!
//! # Example
//!
//! ```
//! use labsite::app::{handle_event, Action, Event, PageSettings, PageState};
//! use labsite::domain::Publication;
//! use labsite::ui::Taxonomy;
//!
//! let mut state: PageState<Publication> = PageState::new(Taxonomy::builtin(), PageSettings::default());
//! let (render, actions) = handle_event(&mut state, &mut Event::SearchInput("theory".into()))?;
//! assert!(!render);
//! assert!(matches!(actions[..], [Action::ScheduleSearch { generation: 1, .. }]));
//! # Ok::<(), labsite::SiteError>(())
//! ```

use super::modes::{CopyStatus, PageStatus};
use super::{Action, PageState};
use crate::domain::error::{Result, SiteError};
use crate::domain::{Criteria, Item};
use crate::source::LoadReport;

/// Events produced by the host page, the loader or the runtime's timers.
#[derive(Debug)]
pub enum Event<I: Item> {
    /// The page began fetching its collection.
    LoadStarted,
    /// The fetch finished, successfully or not.
    Loaded(LoadReport<I>),

    /// The search box changed. Applied after the debounce delay.
    SearchInput(String),
    /// A debounce timer elapsed.
    SearchTimerFired { generation: u64 },
    /// A dropdown changed. Applied immediately.
    SelectFilter { field: String, value: String },
    /// The reset button was clicked.
    Reset,

    /// A citation button was clicked.
    ShowCitation { id: String },
    CloseCitation,
    /// The copy button in the citation panel was clicked.
    CopyCitation,
    /// Outcome of a clipboard write.
    CopyFinished(Result<()>),
    /// The "Copied!" label timer elapsed.
    CopyLabelExpired { generation: u64 },
}

/// Processes an event, mutates page state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be performed in order.
///
/// A `Loaded` event that gets installed is left holding no items.
///
/// # Errors
///
/// Returns [`SiteError::Config`] or [`SiteError::Parse`] when a dropdown
/// names an unknown field or carries a value of the wrong type. The state is
/// left unchanged in that case.
pub fn handle_event<I: Item>(state: &mut PageState<I>, event: &mut Event<I>) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", collection = I::COLLECTION, status = ?state.status).entered();

    match event {
        Event::LoadStarted => {
            if state.status != PageStatus::Unloaded {
                tracing::warn!(status = ?state.status, "page already loading or loaded");
                return Ok((false, vec![]));
            }
            state.status = PageStatus::Loading;
            Ok((true, vec![]))
        }
        Event::Loaded(report) => {
            if state.status.is_settled() {
                tracing::warn!(status = ?state.status, "ignoring second load result");
                return Ok((false, vec![]));
            }
            state.install(report);
            Ok((true, vec![]))
        }

        Event::SearchInput(text) => {
            text.clone_into(&mut state.search_input);
            let generation = state.search_debounce.arm();
            tracing::debug!(generation, "search debounce armed");
            Ok((
                false,
                vec![Action::ScheduleSearch {
                    generation,
                    delay: state.search_debounce.delay(),
                }],
            ))
        }
        Event::SearchTimerFired { generation } => {
            if !state.search_debounce.is_current(*generation) {
                tracing::debug!(generation = *generation, "stale search timer ignored");
                return Ok((false, vec![]));
            }
            state.apply_search();
            Ok((true, vec![]))
        }
        Event::SelectFilter { field, value } => {
            let mut criteria = state.view.criteria().clone();
            criteria.select(field, value)?;
            *state.view.criteria_mut() = criteria;

            // A dropdown change reads the search box as it stands right now.
            state.search_debounce.cancel();
            state.apply_search();
            Ok((true, vec![]))
        }
        Event::Reset => {
            state.reset();
            Ok((true, vec![]))
        }

        Event::ShowCitation { id } => {
            let Some(text) = state.view.find(id).and_then(Item::citation) else {
                let miss = SiteError::LookupMiss(id.clone());
                tracing::debug!(error = %miss, "citation not shown");
                return Ok((false, vec![]));
            };
            state.citation.text = text.to_string();
            state.citation.open = true;
            state.citation.copy = CopyStatus::Idle;
            state.copy_reset.cancel();
            Ok((true, vec![]))
        }
        Event::CloseCitation => {
            if !state.citation.open {
                return Ok((false, vec![]));
            }
            state.citation.open = false;
            state.citation.copy = CopyStatus::Idle;
            state.copy_reset.cancel();
            Ok((true, vec![]))
        }
        Event::CopyCitation => {
            if !state.citation.open || state.citation.text.is_empty() {
                return Ok((false, vec![]));
            }
            state.citation.copy = CopyStatus::Pending;
            Ok((false, vec![Action::WriteClipboard(state.citation.text.clone())]))
        }
        Event::CopyFinished(result) => {
            if state.citation.copy != CopyStatus::Pending {
                return Ok((false, vec![]));
            }
            match result {
                Ok(()) => {
                    state.citation.copy = CopyStatus::Copied;
                    let generation = state.copy_reset.arm();
                    Ok((
                        true,
                        vec![Action::ScheduleCopyReset {
                            generation,
                            delay: state.copy_reset.delay(),
                        }],
                    ))
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to copy citation");
                    state.citation.copy = CopyStatus::Failed;
                    Ok((true, vec![]))
                }
            }
        }
        Event::CopyLabelExpired { generation } => {
            if !state.copy_reset.is_current(*generation) || state.citation.copy != CopyStatus::Copied {
                return Ok((false, vec![]));
            }
            state.citation.copy = CopyStatus::Idle;
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PageSettings;
    use crate::domain::Publication;
    use crate::ui::Taxonomy;

    fn loaded() -> PageState<Publication> {
        let items: Vec<Publication> = serde_json::from_value(serde_json::json!([
            {"id": "a", "title": "Theory of Mind", "year": 2023, "type": "journal", "bibtex": "@article{a}"},
            {"id": "b", "title": "Game Dynamics", "year": 2021, "type": "conference"},
            {"id": "c", "title": "Chemical Agents", "year": 2023, "type": "conference"}
        ]))
        .unwrap();
        let mut state = PageState::new(Taxonomy::builtin(), PageSettings::default());
        handle_event(&mut state, &mut Event::LoadStarted).unwrap();
        handle_event(
            &mut state,
            &mut Event::Loaded(LoadReport { items, diagnostics: vec![], failed: false }),
        )
        .unwrap();
        state
    }

    fn ids(state: &PageState<Publication>) -> Vec<String> {
        state.view.visible().map(|p| p.id.clone()).collect()
    }

    fn select(field: &str, value: &str) -> Event<Publication> {
        Event::SelectFilter { field: field.into(), value: value.into() }
    }

    #[test]
    fn lifecycle_is_one_way() {
        let mut state = loaded();
        assert_eq!(state.status, PageStatus::Loaded);
        assert_eq!(handle_event(&mut state, &mut Event::LoadStarted).unwrap(), (false, vec![]));
        assert_eq!(state.status, PageStatus::Loaded);
    }

    #[test]
    fn search_waits_for_the_timer() {
        let mut state = loaded();
        handle_event(&mut state, &mut Event::SearchInput("the".into())).unwrap();
        let (_, actions) = handle_event(&mut state, &mut Event::SearchInput("theory".into())).unwrap();
        assert_eq!(ids(&state), ["a", "c", "b"]);

        let Action::ScheduleSearch { generation, .. } = actions[0] else {
            panic!("expected a search timer");
        };
        assert_eq!(handle_event(&mut state, &mut Event::SearchTimerFired { generation: generation - 1 }).unwrap().0, false);
        assert_eq!(ids(&state), ["a", "c", "b"]);

        assert!(handle_event(&mut state, &mut Event::SearchTimerFired { generation }).unwrap().0);
        assert_eq!(ids(&state), ["a"]);
    }

    #[test]
    fn dropdowns_apply_immediately() {
        let mut state = loaded();
        let (render, actions) = handle_event(&mut state, &mut select("type", "conference")).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(ids(&state), ["c", "b"]);
    }

    #[test]
    fn bad_dropdown_leaves_state_unchanged() {
        let mut state = loaded();
        handle_event(&mut state, &mut select("type", "conference")).unwrap();
        assert!(handle_event(&mut state, &mut select("venue", "x")).is_err());
        assert!(handle_event(&mut state, &mut select("year", "soon")).is_err());
        assert_eq!(ids(&state), ["c", "b"]);
    }

    #[test]
    fn reset_clears_search_box_and_pending_timer() {
        let mut state = loaded();
        handle_event(&mut state, &mut select("year", "2021")).unwrap();
        let (_, actions) = handle_event(&mut state, &mut Event::SearchInput("game".into())).unwrap();
        handle_event(&mut state, &mut Event::Reset).unwrap();

        assert!(state.search_input.is_empty());
        assert_eq!(ids(&state), ["a", "c", "b"]);

        let Action::ScheduleSearch { generation, .. } = actions[0] else {
            panic!("expected a search timer");
        };
        assert!(!handle_event(&mut state, &mut Event::SearchTimerFired { generation }).unwrap().0);
        assert_eq!(ids(&state), ["a", "c", "b"]);
    }

    #[test]
    fn citation_lookup_uses_full_collection() {
        let mut state = loaded();
        handle_event(&mut state, &mut select("type", "conference")).unwrap();
        let (render, _) = handle_event(&mut state, &mut Event::ShowCitation { id: "a".into() }).unwrap();
        assert!(render);
        assert!(state.citation.open);
        assert_eq!(state.citation.text, "@article{a}");
    }

    #[test]
    fn citation_misses_are_silent() {
        let mut state = loaded();
        assert_eq!(handle_event(&mut state, &mut Event::ShowCitation { id: "zzz".into() }).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &mut Event::ShowCitation { id: "b".into() }).unwrap(), (false, vec![]));
        assert!(!state.citation.open);
    }

    #[test]
    fn copy_success_then_label_reverts() {
        let mut state = loaded();
        handle_event(&mut state, &mut Event::ShowCitation { id: "a".into() }).unwrap();
        let (_, actions) = handle_event(&mut state, &mut Event::CopyCitation).unwrap();
        assert_eq!(actions, vec![Action::WriteClipboard("@article{a}".into())]);

        let (_, actions) = handle_event(&mut state, &mut Event::CopyFinished(Ok(()))).unwrap();
        assert_eq!(state.citation.copy, CopyStatus::Copied);
        let Action::ScheduleCopyReset { generation, delay } = actions[0] else {
            panic!("expected a label timer");
        };
        assert_eq!(delay, std::time::Duration::from_millis(2000));

        handle_event(&mut state, &mut Event::CopyLabelExpired { generation }).unwrap();
        assert_eq!(state.citation.copy, CopyStatus::Idle);
    }

    #[test]
    fn copy_failure_shows_fallback() {
        let mut state = loaded();
        handle_event(&mut state, &mut Event::ShowCitation { id: "a".into() }).unwrap();
        handle_event(&mut state, &mut Event::CopyCitation).unwrap();
        handle_event(&mut state, &mut Event::CopyFinished(Err(SiteError::Clipboard("denied".into())))).unwrap();
        assert_eq!(state.citation.copy, CopyStatus::Failed);
        assert!(state.citation.open);
    }

    #[test]
    fn copy_without_open_panel_is_a_noop() {
        let mut state = loaded();
        assert_eq!(handle_event(&mut state, &mut Event::CopyCitation).unwrap(), (false, vec![]));
    }
}
