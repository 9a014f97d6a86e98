//! In-memory HTML document and the render-target seam.
//!
//! The widget controller never touches a document directly. It holds an
//! `Arc<dyn RenderTarget>` and asks it to insert a fragment ahead of the
//! container's existing children. [`Document`] is the standard target: it
//! keeps the page source, records insertions, and serialises the page with
//! every inserted fragment in place.

use std::sync::Mutex;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Class of the element the highlight fragment is inserted into.
pub const CONTAINER_CLASS: &str = "o-equity-highlight-app";

/// Result of a single insertion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    Inserted,
    /// No container element exists; nothing was changed.
    TargetMissing,
}

/// Capability to insert a rendered fragment as the first child of the
/// widget container.
pub trait RenderTarget: Send + Sync {
    fn insert_first(&self, fragment: &str) -> InsertOutcome;
}

/// Parsed page the widgets are mounted into.
#[derive(Debug)]
pub struct Document {
    source: String,
    has_container: bool,
    /// Inserted fragments, oldest first.
    insertions: Mutex<Vec<String>>,
}

impl Document {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        let has_container = find_container(&html).is_some();
        Self {
            source,
            has_container,
            insertions: Mutex::new(Vec::new()),
        }
    }

    /// Original page source, without insertions.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_render_target(&self) -> bool {
        self.has_container
    }

    /// Inserted fragments in document order (most recent first).
    pub fn inserted_fragments(&self) -> Vec<String> {
        let insertions = self
            .insertions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        insertions.iter().rev().cloned().collect()
    }

    /// Serialises the page with all inserted fragments.
    ///
    /// Fragments are parsed and grafted into the page tree as the first
    /// children of the container, newest first, then the whole tree is
    /// serialised by `scraper`.
    pub fn to_html(&self) -> String {
        let mut html = Html::parse_document(&self.source);
        let Some(container) = find_container(&html).map(|element| element.id()) else {
            return html.html();
        };

        let fragments = self
            .inserted_fragments()
            .iter()
            .map(|fragment| Html::parse_fragment(fragment))
            .collect::<Vec<_>>();
        let roots = fragments
            .iter()
            .flat_map(|fragment| fragment.root_element().children())
            .collect::<Vec<_>>();

        let mut pending = Vec::new();
        for source in roots.into_iter().rev() {
            if let Some(mut parent) = html.tree.get_mut(container) {
                pending.push((parent.prepend(source.value().clone()).id(), source));
            }
        }
        while let Some((target, source)) = pending.pop() {
            for child in source.children() {
                if let Some(mut parent) = html.tree.get_mut(target) {
                    pending.push((parent.append(child.value().clone()).id(), child));
                }
            }
        }

        html.html()
    }
}

impl RenderTarget for Document {
    fn insert_first(&self, fragment: &str) -> InsertOutcome {
        if !self.has_container {
            return InsertOutcome::TargetMissing;
        }

        self.insertions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(fragment.to_owned());
        InsertOutcome::Inserted
    }
}

fn find_container(html: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse(&format!(".{CONTAINER_CLASS}")).ok()?;
    html.select(&selector).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Markets</title></head>
<body><div class="o-equity-highlight-app"><p>existing</p></div></body></html>"#;

    #[test]
    fn detects_container() {
        assert!(Document::parse(PAGE).has_render_target());
        assert!(!Document::parse("<div class=\"other\"></div>").has_render_target());
    }

    #[test]
    fn insertion_lands_before_existing_children() {
        let document = Document::parse(PAGE);
        assert_eq!(
            document.insert_first("<section>widget</section>"),
            InsertOutcome::Inserted
        );

        let html = document.to_html();
        let widget = html.find("<section>widget</section>").expect("fragment present");
        let existing = html.find("<p>existing</p>").expect("original child present");
        assert!(widget < existing);
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn latest_insertion_comes_first() {
        let document = Document::parse(PAGE);
        document.insert_first("<i>first</i>");
        document.insert_first("<i>second</i>");

        assert_eq!(
            document.inserted_fragments(),
            vec![String::from("<i>second</i>"), String::from("<i>first</i>")]
        );
        let html = document.to_html();
        assert!(html.find("<i>second</i>") < html.find("<i>first</i>"));
    }

    #[test]
    fn missing_container_is_a_no_op() {
        let document = Document::parse("<div id=\"page\"><p>body</p></div>");
        let before = document.to_html();

        assert_eq!(
            document.insert_first("<section>widget</section>"),
            InsertOutcome::TargetMissing
        );
        assert!(document.inserted_fragments().is_empty());
        assert_eq!(document.to_html(), before);
    }

    #[test]
    fn untouched_page_serialises_like_scraper() {
        let document = Document::parse(PAGE);
        assert_eq!(document.to_html(), Html::parse_document(PAGE).html());
    }

    #[test]
    fn grafted_fragment_keeps_nesting_and_attributes() {
        let document = Document::parse(PAGE);
        document.insert_first(
            r#"<div class="card"><span class="positive">2.35%</span><img src="c.png"></div>"#,
        );

        let html = document.to_html();
        assert!(html.contains(
            r#"<div class="o-equity-highlight-app"><div class="card"><span class="positive">2.35%</span><img src="c.png"></div><p>existing</p></div>"#
        ));
    }

    #[test]
    fn serialises_void_and_raw_text_elements() {
        let document = Document::parse(
            "<body><img src=\"a.png\"><script>if (a < b) {}</script><p>1 &lt; 2</p></body>",
        );
        let html = document.to_html();
        assert!(html.contains("<img src=\"a.png\">"));
        assert!(!html.contains("</img>"));
        assert!(html.contains("<script>if (a < b) {}</script>"));
        assert!(html.contains("<p>1 &lt; 2</p>"));
    }
}
