//! Per-collection templates.
//!
//! [`Card`] ties an [`Item`] type to its page layout, its card markup and the
//! option lists of its dropdowns. Cards only declare structure; escaping
//! happens when the fragment is serialized.

use super::fragment::{Element, Node};
use super::labels::Taxonomy;
use crate::domain::{Item, NewsEntry, Project, Publication};
use crate::view::CollectionView;
use chrono::NaiveDate;

/// Region ids of a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Holds the rendered cards.
    pub container: &'static str,
    /// Shown instead of the container when nothing is visible.
    pub placeholder: &'static str,
    /// Search box, if the page has one.
    pub search: Option<&'static str>,
    /// Citation panel, if the page has one.
    pub citation: Option<CitationLayout>,
}

/// Region ids of the citation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationLayout {
    pub panel: &'static str,
    pub content: &'static str,
    pub copy_button: &'static str,
    pub fallback: &'static str,
}

impl PageLayout {
    /// Region id of a dropdown: `<field>-filter`.
    #[must_use]
    pub fn filter_region(field: &str) -> String {
        format!("{field}-filter")
    }

    /// Every region the page writes to, given its dropdown fields.
    #[must_use]
    pub fn region_ids(&self, fields: &[&str]) -> Vec<String> {
        let mut ids = vec![self.container.to_string(), self.placeholder.to_string()];
        ids.extend(self.search.map(String::from));
        ids.extend(fields.iter().map(|field| Self::filter_region(field)));
        if let Some(c) = self.citation {
            ids.extend([c.panel, c.content, c.copy_button, c.fallback].map(String::from));
        }
        ids
    }
}

/// An [`Item`] that knows how to present itself.
pub trait Card: Item {
    const LAYOUT: PageLayout;

    /// Full card shown on the collection's own page.
    fn card(&self, labels: &Taxonomy) -> Element;

    /// Short form used in "recent" lists on the landing page.
    fn compact(&self, labels: &Taxonomy) -> Element {
        self.card(labels)
    }

    /// `(value, label)` pairs offered by a dropdown, without the leading "all".
    fn filter_options(view: &CollectionView<Self>, field: &str, labels: &Taxonomy) -> Vec<(String, String)>;
}

/// Long-form US date, e.g. "March 5, 2024".
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn new_tab(link: Element) -> Element {
    link.attr("target", "_blank").attr("rel", "noopener")
}

fn tag_chips(tags: &[String], labels: &Taxonomy, class: &'static str) -> Option<Element> {
    if tags.is_empty() {
        return None;
    }
    Some(Element::new("div").class(class).children_from(tags.iter().map(|tag| {
        Element::new("span")
            .class(format!("tag tag-{tag}"))
            .text(labels.tag(tag))
    })))
}

fn cite_button(item: &impl Item, class: &'static str) -> Option<Element> {
    item.citation().map(|_| {
        Element::new("button")
            .attr("type", "button")
            .class(class)
            .attr("data-cite", item.id())
            .text("BibTeX")
    })
}

fn labelled_options(values: Vec<String>, label: impl Fn(&str) -> String) -> Vec<(String, String)> {
    values
        .into_iter()
        .map(|v| {
            let text = label(&v);
            (v, text)
        })
        .collect()
}

impl Card for Publication {
    const LAYOUT: PageLayout = PageLayout {
        container: "publications-container",
        placeholder: "no-results",
        search: Some("pub-search"),
        citation: Some(CitationLayout {
            panel: "bibtex-modal",
            content: "bibtex-content",
            copy_button: "copy-bibtex",
            fallback: "copy-fallback",
        }),
    };

    fn card(&self, labels: &Taxonomy) -> Element {
        let mut meta = Element::new("div")
            .class("publication-meta")
            .child(Element::new("span").class("publication-authors").text(&self.authors))
            .child(
                Element::new("span")
                    .class("publication-venue")
                    .text(format!("{}, {}", self.venue, self.year)),
            );
        if let Some(kind) = &self.kind {
            meta = meta.child(
                Element::new("span")
                    .class(format!("publication-type-badge type-{kind}"))
                    .text(labels.kind(kind)),
            );
        }

        let title_section = Element::new("div")
            .class("publication-title-section")
            .child(Element::new("h3").class("publication-title").text(&self.title))
            .child(meta)
            .maybe_child(tag_chips(&self.tags, labels, "publication-tags"));

        let abstract_block = self.abstract_text.as_ref().map(|text| {
            Element::new("div")
                .class("publication-abstract")
                .child(Element::new("p").text(text))
        });

        let links = Element::new("div")
            .class("publication-links")
            .maybe_child(
                self.pdf
                    .as_deref()
                    .and_then(|url| Element::link(url, "PDF"))
                    .map(|a| new_tab(a.class("pub-link pub-link-pdf"))),
            )
            .maybe_child(
                self.code
                    .as_deref()
                    .and_then(|url| Element::link(url, "Code"))
                    .map(|a| new_tab(a.class("pub-link pub-link-code"))),
            )
            .maybe_child(
                self.project
                    .as_deref()
                    .and_then(|url| Element::link(url, "Project"))
                    .map(|a| a.class("pub-link pub-link-project")),
            )
            .maybe_child(cite_button(self, "pub-link pub-link-bibtex"));

        Element::new("div")
            .class("publication-card")
            .attr("data-id", &self.id)
            .child(Element::new("div").class("publication-header").child(title_section))
            .maybe_child(abstract_block)
            .child(links)
    }

    fn compact(&self, _labels: &Taxonomy) -> Element {
        let links = Element::new("div")
            .class("publication-links")
            .maybe_child(self.pdf.as_deref().and_then(|url| Element::link(url, "PDF")).map(new_tab))
            .maybe_child(self.code.as_deref().and_then(|url| Element::link(url, "Code")).map(new_tab))
            .maybe_child(
                self.project
                    .as_deref()
                    .and_then(|url| Element::link(url, "Project Page"))
                    .map(new_tab),
            )
            .maybe_child(cite_button(self, "pub-link-bibtex"));

        Element::new("div")
            .class("publication")
            .attr("data-id", &self.id)
            .child(Element::new("div").class("publication-title").text(&self.title))
            .child(Element::new("div").class("publication-authors").text(&self.authors))
            .child(
                Element::new("div")
                    .class("publication-venue")
                    .text(format!("{}, {}", self.venue, self.year)),
            )
            .maybe_child(self.abstract_text.as_ref().map(|text| Element::new("p").text(text)))
            .child(links)
    }

    fn filter_options(view: &CollectionView<Self>, field: &str, labels: &Taxonomy) -> Vec<(String, String)> {
        match field {
            "year" => view
                .year_options()
                .into_iter()
                .map(|y| (y.to_string(), y.to_string()))
                .collect(),
            "type" => labelled_options(
                view.facet_options(|p| p.kind.as_deref().into_iter().collect()),
                |v| labels.kind(v).to_string(),
            ),
            "theme" => labelled_options(
                view.facet_options(|p| p.tags.iter().map(String::as_str).collect()),
                |v| labels.tag(v).to_string(),
            ),
            _ => Vec::new(),
        }
    }
}

impl Card for NewsEntry {
    const LAYOUT: PageLayout = PageLayout {
        container: "news-container",
        placeholder: "no-news",
        search: None,
        citation: None,
    };

    fn card(&self, labels: &Taxonomy) -> Element {
        let mut header = Element::new("div")
            .class("news-header")
            .child(Element::new("span").class("news-date").text(format_long_date(self.date)));
        if let Some(category) = &self.category {
            header = header.child(
                Element::new("span")
                    .class(format!("news-category category-{category}"))
                    .text(labels.category(category)),
            );
        }

        let read_more = self
            .link
            .as_deref()
            .and_then(|url| Element::link(url, "Read more →"))
            .map(|a| {
                let a = a.class("news-link");
                if self.is_external_link() {
                    new_tab(a)
                } else {
                    a
                }
            });

        Element::new("div")
            .class("news-card")
            .attr("data-id", &self.id)
            .child(header)
            .child(Element::new("h3").class("news-title").text(&self.title))
            .child(Element::new("p").class("news-description").text(&self.description))
            .maybe_child(read_more)
    }

    fn filter_options(view: &CollectionView<Self>, field: &str, labels: &Taxonomy) -> Vec<(String, String)> {
        if field != "category" {
            return Vec::new();
        }
        labelled_options(
            view.facet_options(|n| n.category.as_deref().into_iter().collect()),
            |v| labels.category(v).to_string(),
        )
    }
}

impl Card for Project {
    const LAYOUT: PageLayout = PageLayout {
        container: "projects-container",
        placeholder: "no-projects",
        search: Some("project-search"),
        citation: None,
    };

    fn card(&self, labels: &Taxonomy) -> Element {
        let mut meta = Element::new("div")
            .class("project-meta")
            .child(Element::new("span").class("project-year").text(self.year.to_string()));
        if let Some(status) = &self.status {
            meta = meta.child(
                Element::new("span")
                    .class(format!("project-status status-{status}"))
                    .text(labels.status(status)),
            );
        }

        let page_link = self.link.as_deref().and_then(|url| {
            let external = url.starts_with("http");
            Element::link(url, "Project").map(|a| {
                let a = a.class("project-link");
                if external {
                    new_tab(a)
                } else {
                    a
                }
            })
        });

        let links = Element::new("div")
            .class("project-links")
            .maybe_child(page_link)
            .maybe_child(
                self.code
                    .as_deref()
                    .and_then(|url| Element::link(url, "Code"))
                    .map(|a| new_tab(a.class("project-link project-link-code"))),
            );

        Element::new("div")
            .class("project-card")
            .attr("data-id", &self.id)
            .child(Element::new("h3").class("project-title").text(&self.title))
            .child(Element::new("p").class("project-description").text(&self.description))
            .child(meta)
            .maybe_child(tag_chips(&self.tags, labels, "project-tags"))
            .child(links)
    }

    fn filter_options(view: &CollectionView<Self>, field: &str, labels: &Taxonomy) -> Vec<(String, String)> {
        match field {
            "tag" => labelled_options(
                view.facet_options(|p| p.tags.iter().map(String::as_str).collect()),
                |v| labels.tag(v).to_string(),
            ),
            "status" => labelled_options(
                view.facet_options(|p| p.status.as_deref().into_iter().collect()),
                |v| labels.status(v).to_string(),
            ),
            _ => Vec::new(),
        }
    }
}

/// Cards for the visible items, in display order.
#[must_use]
pub fn cards<I: Card>(view: &CollectionView<I>, labels: &Taxonomy) -> Vec<Node> {
    view.visible().map(|item| Node::from(item.card(labels))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(json: serde_json::Value) -> Publication {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn long_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_long_date(date), "March 5, 2024");
    }

    #[test]
    fn publication_card_escapes_fields() {
        let p = publication(serde_json::json!({
            "id": "x", "title": "<b>Bold</b> claims", "authors": "A & B",
            "venue": "ICML", "year": 2022, "tags": ["game-theory"]
        }));
        let html = Node::from(p.card(&Taxonomy::builtin())).to_html();
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; claims"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("ICML, 2022"));
        assert!(html.contains(">Game Theory<"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("data-cite"));
    }

    #[test]
    fn publication_links_and_citation_button() {
        let p = publication(serde_json::json!({
            "id": "lee2023", "title": "T", "year": 2023,
            "pdf": "papers/lee2023.pdf", "code": "javascript:alert(1)",
            "bibtex": "@article{lee2023}"
        }));
        let html = Node::from(p.card(&Taxonomy::builtin())).to_html();
        assert!(html.contains(r#"href="papers/lee2023.pdf""#));
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r#"data-cite="lee2023""#));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn news_card_opens_external_links_in_new_tab() {
        let entry: NewsEntry = serde_json::from_value(serde_json::json!({
            "title": "Award", "date": "2024-03-05", "category": "award",
            "link": "https://example.org/award"
        }))
        .unwrap();
        let html = Node::from(entry.card(&Taxonomy::builtin())).to_html();
        assert!(html.contains("March 5, 2024"));
        assert!(html.contains(r#"class="news-category category-award">Award<"#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("Read more →"));

        let mut local = entry;
        local.link = Some("/news/award".into());
        let html = Node::from(local.card(&Taxonomy::builtin())).to_html();
        assert!(!html.contains("target="));
    }

    #[test]
    fn unknown_category_displays_verbatim() {
        let entry: NewsEntry = serde_json::from_value(serde_json::json!({
            "title": "Retreat", "date": "2024-06-01", "category": "retreat"
        }))
        .unwrap();
        let html = Node::from(entry.card(&Taxonomy::builtin())).to_html();
        assert!(html.contains(">retreat<"));
    }

    #[test]
    fn dropdown_options_come_from_the_data() {
        let view = CollectionView::new(vec![
            publication(serde_json::json!({"id": "a", "title": "A", "year": 2021, "type": "journal", "tags": ["chemical-ai"]})),
            publication(serde_json::json!({"id": "b", "title": "B", "year": 2023, "type": "conference"})),
        ]);
        let labels = Taxonomy::builtin();
        assert_eq!(
            Publication::filter_options(&view, "year", &labels),
            vec![("2023".to_string(), "2023".to_string()), ("2021".to_string(), "2021".to_string())]
        );
        assert_eq!(
            Publication::filter_options(&view, "theme", &labels),
            vec![("chemical-ai".to_string(), "Chemical AI".to_string())]
        );
        assert!(Publication::filter_options(&view, "venue", &labels).is_empty());
    }

    #[test]
    fn news_page_regions() {
        assert_eq!(
            NewsEntry::LAYOUT.region_ids(&["category"]),
            ["news-container", "no-news", "category-filter"]
        );
    }
}
