//! Equity highlight controller.
//!
//! One [`EquityHighlight`] exists per mount point. Construction only captures
//! the mount-point attributes; [`EquityHighlight::start`] runs the lookup on
//! the tokio runtime:
//!
//! ```text
//! resolve host ─▶ quote lookup ─┐
//!              └▶ chart lookup ─┴▶ join ─▶ validate ─▶ render ─▶ insert
//! ```
//!
//! Failures never escape [`EquityHighlight::run`]: they are logged with the
//! symbol and surfaced only as [`RenderOutcome::Failed`].

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::config::{HostConfig, HostTable};
use crate::document::{InsertOutcome, RenderTarget};
use crate::domain::{ChartReference, MountPoint, Quote, Symbol};
use crate::envelope::first_item;
use crate::error::WidgetError;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::template::{render_fragment, QuoteView};

/// Path of the securities web services below the environment host.
pub const SERVICE_PATH: &str = "/research/webservices/securities/v1/";
const QUOTE_ENDPOINT: &str = "quotes";
const CHART_ENDPOINT: &str = "pricevolumechart";

/// Shared settings handed to every controller created by one `init` call.
#[derive(Clone)]
pub struct WidgetOptions {
    pub hosts: HostTable,
    pub http_client: Arc<dyn HttpClient>,
    /// Per-request timeout; `None` lets requests run to completion.
    pub timeout_ms: Option<u64>,
}

impl WidgetOptions {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            ..Self::default()
        }
    }

    pub fn with_hosts(mut self, hosts: HostTable) -> Self {
        self.hosts = hosts;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            hosts: HostTable::default(),
            http_client: Arc::new(ReqwestHttpClient::default()),
            timeout_ms: None,
        }
    }
}

impl Debug for WidgetOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("hosts", &self.hosts)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

/// Quote and chart lookup URLs for one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub quote: String,
    pub chart: String,
}

impl ServiceUrls {
    pub fn new(host: &HostConfig, symbol: &Symbol) -> Self {
        Self {
            quote: service_url(host, QUOTE_ENDPOINT, symbol),
            chart: service_url(host, CHART_ENDPOINT, symbol),
        }
    }
}

fn service_url(host: &HostConfig, endpoint: &str, symbol: &Symbol) -> String {
    let mut url = format!(
        "{}{SERVICE_PATH}{endpoint}?symbols={}",
        host.url,
        urlencoding::encode(symbol.as_str())
    );
    if let Some(source_key) = &host.source_key {
        url.push_str("&source=");
        url.push_str(&urlencoding::encode(source_key));
    }
    url
}

/// Outcome of a completed render attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Inserted,
    /// The fragment rendered but the document has no container for it.
    TargetMissing,
    Failed(WidgetError),
}

/// Result of a successful lookup, before insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedHighlight {
    pub quote: Quote,
    pub chart: Option<ChartReference>,
    pub fragment: String,
    pub insert: InsertOutcome,
}

/// Widget controller bound to a single mount point.
#[derive(Clone)]
pub struct EquityHighlight {
    mount: MountPoint,
    target: Arc<dyn RenderTarget>,
    options: Arc<WidgetOptions>,
}

impl EquityHighlight {
    pub fn new(mount: MountPoint, target: Arc<dyn RenderTarget>, options: Arc<WidgetOptions>) -> Self {
        Self {
            mount,
            target,
            options,
        }
    }

    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    pub fn symbol(&self) -> Option<&str> {
        self.mount.symbol()
    }

    pub fn environment(&self) -> Option<&str> {
        self.mount.environment()
    }

    /// Spawns [`run`](Self::run) on the current tokio runtime.
    pub fn start(&self) -> JoinHandle<RenderOutcome> {
        let widget = self.clone();
        tokio::spawn(async move { widget.run().await })
    }

    /// Fetches, renders and inserts; failures are logged and suppressed.
    pub async fn run(&self) -> RenderOutcome {
        let symbol = self.symbol().unwrap_or_default();
        match self.fetch_and_render().await {
            Ok(rendered) => match rendered.insert {
                InsertOutcome::Inserted => {
                    tracing::debug!(symbol, "equity highlight inserted");
                    RenderOutcome::Inserted
                }
                InsertOutcome::TargetMissing => {
                    tracing::warn!(
                        symbol,
                        "no element with the widget container class; highlight for {symbol} not inserted"
                    );
                    RenderOutcome::TargetMissing
                }
            },
            Err(error) => {
                tracing::error!(
                    symbol,
                    code = error.code(),
                    error = %error,
                    "Error retrieving data for {symbol}: {error}"
                );
                RenderOutcome::Failed(error)
            }
        }
    }

    /// Runs both lookups concurrently and inserts the rendered fragment.
    pub async fn fetch_and_render(&self) -> Result<RenderedHighlight, WidgetError> {
        let symbol = Symbol::parse(self.symbol().unwrap_or_default())
            .map_err(WidgetError::InvalidSymbol)?;
        let host = self.options.hosts.resolve(self.environment());
        let urls = ServiceUrls::new(host, &symbol);

        tracing::debug!(
            symbol = %symbol,
            environment = self.environment().unwrap_or(self.options.hosts.default_environment()),
            quote_url = %urls.quote,
            chart_url = %urls.chart,
            "requesting equity highlight data"
        );

        let (quote_envelope, chart_envelope) =
            tokio::try_join!(self.fetch_json(&urls.quote), self.fetch_json(&urls.chart))?;

        let quote = extract_quote(&quote_envelope, &urls.quote)?;
        let chart = extract_chart(&chart_envelope);
        if chart.is_none() {
            tracing::debug!(symbol = %symbol, "chart lookup returned no usable item");
        }

        let view = QuoteView::new(&quote, chart.as_ref())?;
        let fragment = render_fragment(&view);
        let insert = self.target.insert_first(&fragment);

        Ok(RenderedHighlight {
            quote,
            chart,
            fragment,
            insert,
        })
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, WidgetError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.options.timeout_ms);
        let response = self
            .options
            .http_client
            .execute(request)
            .await
            .map_err(|source| WidgetError::Transport {
                url: url.to_owned(),
                source,
            })?;

        if !response.is_success() {
            return Err(WidgetError::UpstreamStatus {
                url: url.to_owned(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| WidgetError::Decode {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }
}

impl Debug for EquityHighlight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquityHighlight")
            .field("mount", &self.mount)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn extract_quote(envelope: &Value, url: &str) -> Result<Quote, WidgetError> {
    let item = first_item(envelope).ok_or(WidgetError::NoQuoteData)?;
    Quote::deserialize(item).map_err(|e| WidgetError::Decode {
        url: url.to_owned(),
        message: e.to_string(),
    })
}

fn extract_chart(envelope: &Value) -> Option<ChartReference> {
    first_item(envelope).and_then(|item| ChartReference::deserialize(item).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::http_client::{FixtureHttpClient, HttpError, HttpResponse};

    const QUOTE_BODY: &str = r#"{"data":{"items":[{"basic":{"name":"Apple Inc.","symbol":"AAPL","currency":"USD"},"quote":{"lastPrice":150.005,"change1Day":-1.2,"change1DayPercent":-0.8,"change1WeekPercent":2.345}}]}}"#;
    const CHART_BODY: &str = r#"{"data":{"items":[{"chartFileName":"chart123.png"}]}}"#;
    const PAGE: &str = r#"<div class="o-equity-highlight-app"></div>"#;

    fn build_widget(
        client: FixtureHttpClient,
        symbol: &str,
        environment: Option<&str>,
    ) -> (EquityHighlight, Arc<Document>) {
        let document = Arc::new(Document::parse(PAGE));
        let options = Arc::new(WidgetOptions::with_http_client(Arc::new(client)));
        let mount = MountPoint::new(Some(symbol.to_owned()), environment.map(str::to_owned));
        (
            EquityHighlight::new(mount, document.clone(), options),
            document,
        )
    }

    #[test]
    fn builds_service_urls_with_optional_source_key() {
        let symbol = Symbol::parse("AAPL").expect("valid");
        let plain = ServiceUrls::new(&HostConfig::new("https://h.test", None), &symbol);
        assert_eq!(
            plain.quote,
            "https://h.test/research/webservices/securities/v1/quotes?symbols=AAPL"
        );
        assert_eq!(
            plain.chart,
            "https://h.test/research/webservices/securities/v1/pricevolumechart?symbols=AAPL"
        );

        let keyed = ServiceUrls::new(
            &HostConfig::new("https://h.test", Some(String::from("key 1"))),
            &symbol,
        );
        assert!(keyed.quote.ends_with("?symbols=AAPL&source=key%201"));
        assert!(keyed.chart.ends_with("?symbols=AAPL&source=key%201"));
    }

    #[test]
    fn encodes_exchange_qualified_symbols() {
        let symbol = Symbol::parse("VOD:LSE").expect("valid");
        let urls = ServiceUrls::new(&HostConfig::new("https://h.test", None), &symbol);
        assert!(urls.quote.ends_with("quotes?symbols=VOD%3ALSE"));
    }

    #[tokio::test]
    async fn renders_quote_and_chart() {
        let client = FixtureHttpClient::new()
            .with_json("/quotes?", QUOTE_BODY)
            .with_json("/pricevolumechart?", CHART_BODY);
        let (widget, document) = build_widget(client, "AAPL", Some("prod"));

        let rendered = widget.fetch_and_render().await.expect("render should succeed");
        assert_eq!(rendered.insert, InsertOutcome::Inserted);
        assert_eq!(rendered.chart.as_ref().map(ChartReference::as_str), Some("chart123.png"));
        assert!(rendered.fragment.contains("150.01"));
        assert_eq!(document.inserted_fragments(), vec![rendered.fragment]);
    }

    #[tokio::test]
    async fn empty_quote_items_fail_with_no_quote_data() {
        let client = FixtureHttpClient::new()
            .with_json("/quotes?", r#"{"data":{"items":[]}}"#)
            .with_json("/pricevolumechart?", CHART_BODY);
        let (widget, document) = build_widget(client, "AAPL", None);

        assert_eq!(
            widget.run().await,
            RenderOutcome::Failed(WidgetError::NoQuoteData)
        );
        assert!(document.inserted_fragments().is_empty());
    }

    #[tokio::test]
    async fn chart_transport_failure_fails_the_join() {
        let client = FixtureHttpClient::new()
            .with_json("/quotes?", QUOTE_BODY)
            .with_error("/pricevolumechart?", HttpError::new("connection reset"));
        let (widget, document) = build_widget(client, "AAPL", None);

        let outcome = widget.run().await;
        assert!(matches!(
            outcome,
            RenderOutcome::Failed(WidgetError::Transport { .. })
        ));
        assert!(document.inserted_fragments().is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let client = FixtureHttpClient::new()
            .with_response("/quotes?", HttpResponse::with_status(503, "unavailable"))
            .with_json("/pricevolumechart?", CHART_BODY);
        let (widget, _) = build_widget(client, "AAPL", None);

        let err = widget.fetch_and_render().await.expect_err("must fail");
        assert!(matches!(err, WidgetError::UpstreamStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let client = FixtureHttpClient::new()
            .with_json("/quotes?", "<html>not json</html>")
            .with_json("/pricevolumechart?", CHART_BODY);
        let (widget, _) = build_widget(client, "AAPL", None);

        let err = widget.fetch_and_render().await.expect_err("must fail");
        assert_eq!(err.code(), "widget.decode");
    }

    #[tokio::test]
    async fn quote_item_missing_fields_is_a_decode_error() {
        let client = FixtureHttpClient::new()
            .with_json("/quotes?", r#"{"data":{"items":[{"basic":{"name":"Apple Inc."}}]}}"#)
            .with_json("/pricevolumechart?", CHART_BODY);
        let (widget, _) = build_widget(client, "AAPL", None);

        let err = widget.fetch_and_render().await.expect_err("must fail");
        assert_eq!(err.code(), "widget.decode");
    }

    #[tokio::test]
    async fn missing_symbol_never_reaches_the_network() {
        let client = Arc::new(FixtureHttpClient::new());
        let document = Arc::new(Document::parse(PAGE));
        let options = Arc::new(WidgetOptions::with_http_client(client.clone()));
        let widget = EquityHighlight::new(MountPoint::default(), document, options);

        let outcome = widget.run().await;
        assert!(matches!(
            outcome,
            RenderOutcome::Failed(WidgetError::InvalidSymbol(_))
        ));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn timeout_option_is_forwarded_to_requests() {
        let client = Arc::new(
            FixtureHttpClient::new()
                .with_json("/quotes?", QUOTE_BODY)
                .with_json("/pricevolumechart?", CHART_BODY),
        );
        let document = Arc::new(Document::parse(PAGE));
        let options = Arc::new(WidgetOptions::with_http_client(client.clone()).with_timeout_ms(2_500));
        let widget = EquityHighlight::new(
            MountPoint::new(Some(String::from("AAPL")), None),
            document,
            options,
        );

        assert_eq!(widget.run().await, RenderOutcome::Inserted);
        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|request| request.timeout_ms == Some(2_500)));
    }
}
