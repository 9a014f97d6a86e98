//! Fixed HTML template for the highlight fragment.

use crate::domain::{ChartReference, Quote};
use crate::error::WidgetError;
use crate::format::{format_two_decimals, ChangeDirection};

/// Tearsheet link prefix for the company name.
pub const TEARSHEET_URL: &str = "//markets.ft.com/data/equities/tearsheet/summary?s=";
/// Link target for the "view more" footer.
pub const EQUITIES_URL: &str = "//markets.ft.com/data/equities";

/// Display-ready quote figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub company_name: String,
    pub symbol: String,
    pub currency: String,
    pub last_price: String,
    pub change_1_day: String,
    pub change_1_day_percent: String,
    pub change_1_week_percent: String,
    pub change_1_day_direction: ChangeDirection,
    pub change_1_week_direction: ChangeDirection,
    pub chart_source: String,
}

impl QuoteView {
    pub fn new(quote: &Quote, chart: Option<&ChartReference>) -> Result<Self, WidgetError> {
        let figures = &quote.quote;
        let two_decimals = |field: &'static str, value: f64| {
            format_two_decimals(field, value).map_err(WidgetError::InvalidNumber)
        };

        let change_1_day = two_decimals("change1Day", figures.change_1_day)?;
        let change_1_week_percent =
            two_decimals("change1WeekPercent", figures.change_1_week_percent)?;

        Ok(Self {
            company_name: quote.company_name().to_owned(),
            symbol: quote.symbol().to_owned(),
            currency: quote.currency().to_owned(),
            last_price: two_decimals("lastPrice", figures.last_price)?,
            change_1_day_percent: two_decimals("change1DayPercent", figures.change_1_day_percent)?,
            change_1_day_direction: ChangeDirection::parse(&change_1_day),
            change_1_week_direction: ChangeDirection::parse(&change_1_week_percent),
            change_1_day,
            change_1_week_percent,
            chart_source: chart
                .map(|chart| chart.as_str().to_owned())
                .unwrap_or_default(),
        })
    }
}

/// Renders the highlight fragment. All interpolated values are escaped.
pub fn render_fragment(view: &QuoteView) -> String {
    let symbol = escape_html(&view.symbol);
    let tearsheet = escape_html(&format!(
        "{TEARSHEET_URL}{}",
        urlencoding::encode(&view.symbol)
    ));
    let company_name = escape_html(&view.company_name);
    let currency = escape_html(&view.currency);
    let last_price = escape_html(&view.last_price);
    let change_1_day = escape_html(&view.change_1_day);
    let change_1_day_percent = escape_html(&view.change_1_day_percent);
    let change_1_week_percent = escape_html(&view.change_1_week_percent);
    let chart_source = escape_html(&view.chart_source);
    let day_class = view.change_1_day_direction.class_name();
    let week_class = view.change_1_week_direction.class_name();

    format!(
        r#"<div class="o-grid-container demo-container">
  <div class="o-teaser" data-o-component="o-teaser">
    <div class="o-teaser__content">
      <h2 class="o-equity-highlight-app__header">Equity highlight</h2>
      <div class="o-equity-highlight-app__symbol o-teaser__meta">
        <a href="{tearsheet}" class="o-teaser__tag">{company_name}</a>
        <time data-o-component="o-date" class="o-date o-teaser__timestamp">{symbol}</time>
      </div>
      <div class="o-equity-highlight-app__price">{last_price}
        <time data-o-component="o-date" class="o-date o-teaser__timestamp">{currency}</time>
      </div>
      <div class="o-equity-highlight-app__border"></div>
      <div class="o-equity-highlight-app__price-change">
        Today's Change
        <span class="{day_class}">{change_1_day}/{change_1_day_percent}%</span>
      </div>
      <div class="o-equity-highlight-app__price-change--1week">
        1 Week Change
        <span class="{week_class}">{change_1_week_percent}%</span>
      </div>
      <img src="{chart_source}" alt="demo image" class="o-equity-highlight-app__chart-image">
      <div class="o-equity-highlight-app__border"></div>
      <div class="o-teaser-collection">
        <h2 class="o-teaser-collection__heading">
          <a class="o-teaser-collection__heading-link" href="{EQUITIES_URL}">View more equities</a>
        </h2>
      </div>
    </div>
  </div>
</div>"#
    )
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
