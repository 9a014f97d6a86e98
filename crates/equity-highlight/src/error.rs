use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors for inputs read from the document or the host table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or digit: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("host table default environment '{environment}' has no entry")]
    MissingDefaultEnvironment { environment: String },
    #[error("host url for environment '{environment}' cannot be empty")]
    EmptyHostUrl { environment: String },
    #[error("host table is not valid json: {message}")]
    MalformedHostTable { message: String },
}

/// Widget failure classification. Every variant is logged and suppressed by
/// [`EquityHighlight::run`](crate::EquityHighlight::run).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("invalid symbol: {0}")]
    InvalidSymbol(ValidationError),

    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("upstream returned status {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("no quote data available")]
    NoQuoteData,

    #[error("invalid numeric value: {0}")]
    InvalidNumber(ValidationError),
}

impl WidgetError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSymbol(_) => "widget.invalid_symbol",
            Self::Transport { .. } => "widget.transport",
            Self::UpstreamStatus { .. } => "widget.upstream_status",
            Self::Decode { .. } => "widget.decode",
            Self::NoQuoteData => "widget.no_quote_data",
            Self::InvalidNumber(_) => "widget.invalid_number",
        }
    }
}
