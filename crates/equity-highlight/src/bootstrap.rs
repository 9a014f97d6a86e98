//! Mount-point discovery.

use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};
use tokio::task::JoinHandle;

use crate::document::Document;
use crate::domain::{MountPoint, MOUNT_MARKER_SELECTOR};
use crate::widget::{EquityHighlight, RenderOutcome, WidgetOptions};

/// Where discovery starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Root {
    /// The document body.
    #[default]
    Body,
    /// The first element matching a CSS selector.
    Selector(String),
}

impl From<&str> for Root {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<String> for Root {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// Creates one controller per mount point under `root`.
///
/// A root that is itself a mount point yields exactly that one controller.
/// Controllers are returned unstarted; see [`start_all`].
pub fn init(document: &Arc<Document>, root: Root, options: WidgetOptions) -> Vec<EquityHighlight> {
    let mounts = discover(document, &root);
    tracing::debug!(root = ?root, count = mounts.len(), "discovered equity highlight mount points");

    let options = Arc::new(options);
    mounts
        .into_iter()
        .map(|mount| EquityHighlight::new(mount, document.clone(), options.clone()))
        .collect()
}

/// Starts every controller; the returned handles resolve once each settles.
pub fn start_all(widgets: &[EquityHighlight]) -> Vec<JoinHandle<RenderOutcome>> {
    widgets.iter().map(EquityHighlight::start).collect()
}

/// Mount points under `root`, in document order.
pub fn discover(document: &Document, root: &Root) -> Vec<MountPoint> {
    let html = Html::parse_document(document.source());

    let Some(marker) = parse_selector(MOUNT_MARKER_SELECTOR) else {
        return Vec::new();
    };

    let root_selector = match root {
        Root::Body => "body",
        Root::Selector(selector) => selector.as_str(),
    };
    let Some(root_selector) = parse_selector(root_selector) else {
        return Vec::new();
    };

    let Some(root_element) = html.select(&root_selector).next() else {
        tracing::warn!(root = ?root, "equity highlight root element not found");
        return Vec::new();
    };

    if marker.matches(&root_element) {
        return vec![MountPoint::from_element(&root_element)];
    }

    root_element
        .select(&marker)
        .map(|element: ElementRef<'_>| MountPoint::from_element(&element))
        .collect()
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(error) => {
            tracing::warn!(selector, error = ?error, "invalid equity highlight selector");
            None
        }
    }
}
