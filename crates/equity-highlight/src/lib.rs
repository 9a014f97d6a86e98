//! # Equity Highlight
//!
//! Renders an "equity highlight" fragment (company, last price, one-day and
//! one-week change, price/volume chart) into an HTML document for every
//! widget mount point it finds.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bootstrap`] | Mount-point discovery and controller creation |
//! | [`config`] | Environment → host table |
//! | [`document`] | Parsed page and the render-target seam |
//! | [`domain`] | Symbols, mount points, quote and chart payloads |
//! | [`envelope`] | Response envelope validation |
//! | [`error`] | Validation and widget errors |
//! | [`format`] | Two-decimal display and change direction classes |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`template`] | Fixed fragment template |
//! | [`widget`] | Per-mount-point controller |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use equity_highlight::{init, start_all, Document, Root, WidgetOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let page = r#"<div class="o-equity-highlight-app"
//!                        data-o-component="o-equity-highlight-app"
//!                        data-o-equity-highlight-app-symbol="AAPL"
//!                        data-env="prod"></div>"#;
//!     let document = Arc::new(Document::parse(page));
//!
//!     let widgets = init(&document, Root::Body, WidgetOptions::default());
//!     for handle in start_all(&widgets) {
//!         let _ = handle.await;
//!     }
//!
//!     println!("{}", document.to_html());
//! }
//! ```
//!
//! ## Error Handling
//!
//! Widgets decorate a page they do not own, so no failure escapes
//! [`EquityHighlight::run`]. Each failure is logged through `tracing` with the
//! symbol and a [`WidgetError::code`], and reported as
//! [`RenderOutcome::Failed`]:
//!
//! ```rust
//! use equity_highlight::{RenderOutcome, WidgetError};
//!
//! fn describe(outcome: &RenderOutcome) -> &'static str {
//!     match outcome {
//!         RenderOutcome::Inserted => "rendered",
//!         RenderOutcome::TargetMissing => "nowhere to render",
//!         RenderOutcome::Failed(WidgetError::NoQuoteData) => "no quote",
//!         RenderOutcome::Failed(_) => "lookup failed",
//!     }
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod document;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod http_client;
pub mod template;
pub mod widget;

pub use bootstrap::{discover, init, start_all, Root};
pub use config::{HostConfig, HostTable};
pub use document::{Document, InsertOutcome, RenderTarget, CONTAINER_CLASS};
pub use domain::{ChartReference, MountPoint, Quote, QuoteBasic, QuoteFigures, Symbol};
pub use envelope::{first_item, validate_response};
pub use error::{ValidationError, WidgetError};
pub use format::{format_two_decimals, ChangeDirection};
pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use template::{render_fragment, QuoteView};
pub use widget::{EquityHighlight, RenderOutcome, RenderedHighlight, ServiceUrls, WidgetOptions};
