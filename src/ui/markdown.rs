//! Markdown-backed pages.
//!
//! Conversion and highlighting are delegated to optional collaborators. When
//! no converter is available the text is shown escaped inside `<pre>`, and a
//! missing highlighter simply leaves code blocks plain.
//!
//! # Frontmatter
//!
//! Blog posts may start with a metadata block:
//!
//! ```text
//! ---
//! title: Notes on self-play
//! date: 2024-05-01
//! tags: rl, games
//! ---
//! Body text...
//! ```
//!
//! Each line is split at its first colon; the remainder is the value, so
//! values may contain colons themselves.

use super::fragment::{Element, Node};
use super::surface::Surface;
use std::collections::BTreeMap;

/// Markdown-to-HTML converter. Its output is trusted markup.
pub trait MarkdownConverter {
    fn to_html(&self, markdown: &str) -> String;
}

/// Syntax highlighter run over converted HTML.
pub trait Highlighter {
    fn highlight(&self, html: &str) -> String;
}

impl<F: Fn(&str) -> String> MarkdownConverter for F {
    fn to_html(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// Collaborators available to the Markdown renderer.
#[derive(Clone, Copy, Default)]
pub struct MarkdownTools<'a> {
    pub converter: Option<&'a dyn MarkdownConverter>,
    pub highlighter: Option<&'a dyn Highlighter>,
}

impl std::fmt::Debug for MarkdownTools<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownTools")
            .field("converter", &self.converter.is_some())
            .field("highlighter", &self.highlighter.is_some())
            .finish()
    }
}

/// A document split into frontmatter and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    pub metadata: BTreeMap<String, String>,
    pub content: &'a str,
}

/// Splits a `---` delimited metadata block off the front of `text`.
///
/// Text without a complete block is returned whole with empty metadata.
#[must_use]
pub fn parse_frontmatter(text: &str) -> Frontmatter<'_> {
    let unsplit = Frontmatter {
        metadata: BTreeMap::new(),
        content: text,
    };

    let Some(rest) = text.strip_prefix("---\n") else {
        return unsplit;
    };

    // The closing delimiter must follow a newline, so "---\n---\n" is not a block.
    let Some(end) = rest.find("\n---\n") else {
        return unsplit;
    };

    let block = &rest[..end];
    let content = &rest[end + "\n---\n".len()..];

    let metadata = block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Frontmatter { metadata, content }
}

fn body_nodes(markdown: &str, tools: MarkdownTools<'_>) -> Vec<Node> {
    let Some(converter) = tools.converter else {
        tracing::debug!("no markdown converter, showing preformatted text");
        return vec![Element::new("pre").text(markdown).into()];
    };

    let html = converter.to_html(markdown);
    let html = match tools.highlighter {
        Some(highlighter) => highlighter.highlight(&html),
        None => html,
    };
    vec![Node::Raw(html)]
}

/// Renders Markdown into a region. Returns `false` if the region is absent.
pub fn render_markdown<S: Surface + ?Sized>(
    surface: &mut S,
    region: &str,
    markdown: &str,
    tools: MarkdownTools<'_>,
) -> bool {
    if !surface.has_region(region) {
        return false;
    }
    surface.replace(region, &body_nodes(markdown, tools))
}

/// Renders a blog post: title, date and tags from the frontmatter, then the body.
pub fn render_blog_post<S: Surface + ?Sized>(
    surface: &mut S,
    region: &str,
    text: &str,
    tools: MarkdownTools<'_>,
) -> bool {
    if !surface.has_region(region) {
        return false;
    }

    let Frontmatter { metadata, content } = parse_frontmatter(text);
    let mut nodes: Vec<Node> = Vec::new();

    if let Some(title) = metadata.get("title") {
        nodes.push(Element::new("h1").text(title).into());
    }
    if let Some(date) = metadata.get("date") {
        nodes.push(Element::new("p").class("meta").text(format!("Posted on {date}")).into());
    }
    if let Some(tags) = metadata.get("tags") {
        nodes.push(Element::new("p").class("tags").text(format!("Tags: {tags}")).into());
    }
    nodes.extend(body_nodes(content, tools));

    surface.replace(region, &nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Document;

    struct LanguageTagger;

    impl Highlighter for LanguageTagger {
        fn highlight(&self, html: &str) -> String {
            html.replace("<code>", "<code class=\"language-rust\">")
        }
    }

    fn paragraphs(markdown: &str) -> String {
        format!("<p>{}</p><code>x</code>", markdown.trim())
    }

    #[test]
    fn splits_frontmatter_at_first_colon() {
        let parsed = parse_frontmatter("---\ntitle: Time: a history\ndate: 2024-05-01\nnot metadata\n---\nBody\n");
        assert_eq!(parsed.metadata.get("title").map(String::as_str), Some("Time: a history"));
        assert_eq!(parsed.metadata.get("date").map(String::as_str), Some("2024-05-01"));
        assert_eq!(parsed.metadata.len(), 2);
        assert_eq!(parsed.content, "Body\n");
    }

    #[test]
    fn text_without_frontmatter_is_all_content() {
        let parsed = parse_frontmatter("# Title\n---\nnot a block\n");
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.content, "# Title\n---\nnot a block\n");

        let unterminated = parse_frontmatter("---\ntitle: x\n");
        assert!(unterminated.metadata.is_empty());
    }

    #[test]
    fn fallback_is_escaped_preformatted_text() {
        let mut doc = Document::with_regions(["post"]);
        assert!(render_markdown(&mut doc, "post", "a < b", MarkdownTools::default()));
        assert_eq!(doc.html("post"), "<pre>a &lt; b</pre>");
    }

    #[test]
    fn converter_then_highlighter() {
        let mut doc = Document::with_regions(["post"]);
        let convert = paragraphs;
        let tools = MarkdownTools {
            converter: Some(&convert),
            highlighter: Some(&LanguageTagger),
        };
        render_markdown(&mut doc, "post", "hello", tools);
        assert_eq!(doc.html("post"), "<p>hello</p><code class=\"language-rust\">x</code>");
    }

    #[test]
    fn missing_region_is_a_noop() {
        let mut doc = Document::new();
        assert!(!render_markdown(&mut doc, "post", "x", MarkdownTools::default()));
        assert!(!render_blog_post(&mut doc, "post", "x", MarkdownTools::default()));
    }

    #[test]
    fn blog_post_metadata_header() {
        let mut doc = Document::with_regions(["post"]);
        render_blog_post(
            &mut doc,
            "post",
            "---\ntitle: <Hello>\ndate: 2024-05-01\ntags: rl, games\n---\nBody",
            MarkdownTools::default(),
        );
        assert_eq!(
            doc.html("post"),
            concat!(
                "<h1>&lt;Hello&gt;</h1>",
                "<p class=\"meta\">Posted on 2024-05-01</p>",
                "<p class=\"tags\">Tags: rl, games</p>",
                "<pre>Body</pre>"
            )
        );
    }
}
