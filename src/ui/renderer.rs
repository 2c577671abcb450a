//! Top-level rendering coordinator.
//!
//! [`render`] writes a [`PageViewModel`] into a [`Surface`]. Each region is
//! replaced wholesale, so rendering the same view model twice leaves the
//! surface exactly as rendering it once.
//!
//! # Example
//!
//! ```
//! use labsite::ui::{render, Document, ListBody, PageViewModel};
//! use labsite::ui::cards::Card;
//! use labsite::domain::NewsEntry;
//!
//! let layout = NewsEntry::LAYOUT;
//! let mut doc = Document::with_regions([layout.container, layout.placeholder]);
//! let vm = PageViewModel {
//!     layout,
//!     body: ListBody::Failed { message: "Failed to load news. Please try again later.".into() },
//!     search_text: String::new(),
//!     filters: vec![],
//!     citation: None,
//! };
//!
//! render(&mut doc, &vm);
//! assert!(doc.is_hidden(layout.container));
//! assert!(doc.html(layout.placeholder).contains("Failed to load news"));
//! ```

use super::cards::{Card, CitationLayout, PageLayout};
use super::fragment::{Element, Node};
use super::labels::Taxonomy;
use super::surface::Surface;
use super::viewmodel::{CitationViewModel, FilterControl, ListBody, PageViewModel};
use crate::domain::ALL;

/// Renders the whole page.
pub fn render<S: Surface + ?Sized>(surface: &mut S, vm: &PageViewModel) {
    let _span = tracing::debug_span!("render", container = vm.layout.container).entered();

    render_body(surface, &vm.layout, &vm.body);

    if let Some(search) = vm.layout.search {
        surface.replace(search, &[search_box(&vm.search_text)]);
    }

    for control in &vm.filters {
        surface.replace(&PageLayout::filter_region(control.field), &options(control));
    }

    if let (Some(layout), Some(citation)) = (vm.layout.citation, &vm.citation) {
        render_citation(surface, layout, citation);
    }
}

/// Fills the list container, or hides it and shows the placeholder.
fn render_body<S: Surface + ?Sized>(surface: &mut S, layout: &PageLayout, body: &ListBody) {
    match body {
        ListBody::Loading => {
            surface.set_hidden(layout.placeholder, true);
        }
        ListBody::Cards(cards) => {
            surface.replace(layout.container, cards);
            surface.set_hidden(layout.container, false);
            surface.set_hidden(layout.placeholder, true);
        }
        ListBody::Empty { message } => {
            show_placeholder(surface, layout, Element::new("p").class("no-results-message").text(message));
        }
        ListBody::Failed { message } => {
            show_placeholder(surface, layout, Element::new("p").class("error-message").text(message));
        }
    }
}

fn show_placeholder<S: Surface + ?Sized>(surface: &mut S, layout: &PageLayout, message: Element) {
    surface.replace(layout.container, &[]);
    surface.set_hidden(layout.container, true);
    surface.replace(layout.placeholder, &[message.into()]);
    surface.set_hidden(layout.placeholder, false);
}

fn search_box(text: &str) -> Node {
    Element::new("input")
        .attr("type", "search")
        .attr("value", text)
        .into()
}

fn options(control: &FilterControl) -> Vec<Node> {
    let all = std::iter::once((ALL.to_string(), "All".to_string()));
    all.chain(control.options.iter().cloned())
        .map(|(value, label)| {
            let option = Element::new("option").attr("value", value.as_str());
            let option = if value == control.selected {
                option.attr("selected", "")
            } else {
                option
            };
            option.text(label).into()
        })
        .collect()
}

fn render_citation<S: Surface + ?Sized>(
    surface: &mut S,
    layout: CitationLayout,
    citation: &CitationViewModel,
) {
    surface.set_hidden(layout.panel, !citation.open);
    surface.replace(layout.content, &[Node::text(citation.text.as_str())]);
    surface.replace(layout.copy_button, &[Node::text(citation.copy_label)]);
    surface.set_class(layout.copy_button, "copied", citation.copied);

    match citation.fallback {
        Some(message) => {
            surface.replace(layout.fallback, &[Node::text(message)]);
            surface.set_hidden(layout.fallback, false);
        }
        None => {
            surface.replace(layout.fallback, &[]);
            surface.set_hidden(layout.fallback, true);
        }
    }
}

/// Renders a short "recent items" list into `region`, e.g. on the landing page.
///
/// Returns `false` if the region does not exist.
pub fn render_recent<I: Card, S: Surface + ?Sized>(
    surface: &mut S,
    region: &str,
    items: &[I],
    labels: &Taxonomy,
) -> bool {
    let nodes: Vec<Node> = items.iter().map(|item| item.compact(labels).into()).collect();
    surface.replace(region, &nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewsEntry, Publication};
    use crate::ui::surface::Document;

    fn publication_doc() -> Document {
        let layout = Publication::LAYOUT;
        let citation = layout.citation.unwrap();
        Document::with_regions([
            layout.container,
            layout.placeholder,
            "pub-search",
            "year-filter",
            citation.panel,
            citation.content,
            citation.copy_button,
            citation.fallback,
        ])
    }

    fn vm(body: ListBody) -> PageViewModel {
        PageViewModel {
            layout: Publication::LAYOUT,
            body,
            search_text: "theory".into(),
            filters: vec![FilterControl {
                field: "year",
                selected: "2021".into(),
                options: vec![("2023".into(), "2023".into()), ("2021".into(), "2021".into())],
            }],
            citation: Some(CitationViewModel {
                open: false,
                text: String::new(),
                copy_label: "Copy",
                copied: false,
                fallback: None,
            }),
        }
    }

    #[test]
    fn rendering_twice_equals_rendering_once() {
        let model = vm(ListBody::Cards(vec![Node::text("card")]));
        let mut once = publication_doc();
        render(&mut once, &model);

        let mut twice = publication_doc();
        render(&mut twice, &model);
        render(&mut twice, &model);

        assert_eq!(once.to_html(), twice.to_html());
        assert_eq!(twice.html("publications-container"), "card");
    }

    #[test]
    fn empty_view_swaps_container_for_placeholder() {
        let mut doc = publication_doc();
        render(&mut doc, &vm(ListBody::Cards(vec![Node::text("card")])));
        render(&mut doc, &vm(ListBody::Empty { message: "No publications found.".into() }));

        assert!(doc.is_hidden("publications-container"));
        assert_eq!(doc.html("publications-container"), "");
        assert!(!doc.is_hidden("no-results"));

        render(&mut doc, &vm(ListBody::Cards(vec![Node::text("card")])));
        assert!(!doc.is_hidden("publications-container"));
        assert!(doc.is_hidden("no-results"));
    }

    #[test]
    fn controls_reflect_criteria() {
        let mut doc = publication_doc();
        render(&mut doc, &vm(ListBody::Loading));
        assert_eq!(doc.html("pub-search"), r#"<input type="search" value="theory">"#);
        assert_eq!(
            doc.html("year-filter"),
            concat!(
                r#"<option value="all">All</option>"#,
                r#"<option value="2023">2023</option>"#,
                r#"<option value="2021" selected="">2021</option>"#
            )
        );
    }

    #[test]
    fn citation_panel_states() {
        let mut doc = publication_doc();
        let mut model = vm(ListBody::Loading);
        render(&mut doc, &model);
        assert!(doc.is_hidden("bibtex-modal"));
        assert!(doc.is_hidden("copy-fallback"));

        model.citation = Some(CitationViewModel {
            open: true,
            text: "@article{x}".into(),
            copy_label: "Copied!",
            copied: true,
            fallback: None,
        });
        render(&mut doc, &model);
        assert!(!doc.is_hidden("bibtex-modal"));
        assert_eq!(doc.html("bibtex-content"), "@article{x}");
        assert_eq!(doc.html("copy-bibtex"), "Copied!");
        assert!(doc.has_class("copy-bibtex", "copied"));
    }

    #[test]
    fn recent_list_uses_compact_cards() {
        let news: Vec<NewsEntry> = serde_json::from_value(serde_json::json!([
            {"title": "A", "date": "2024-01-01"}
        ]))
        .unwrap();
        let mut doc = Document::with_regions(["recent-news"]);
        assert!(render_recent(&mut doc, "recent-news", &news, &Taxonomy::builtin()));
        assert!(doc.html("recent-news").contains("January 1, 2024"));
        assert!(!render_recent(&mut doc, "missing", &news, &Taxonomy::builtin()));
    }
}
