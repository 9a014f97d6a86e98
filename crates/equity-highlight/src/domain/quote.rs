use serde::{Deserialize, Serialize};

/// Company and price fields from the first item of a quote lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub basic: QuoteBasic,
    pub quote: QuoteFigures,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBasic {
    pub name: String,
    pub symbol: String,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFigures {
    pub last_price: f64,
    #[serde(rename = "change1Day")]
    pub change_1_day: f64,
    #[serde(rename = "change1DayPercent")]
    pub change_1_day_percent: f64,
    #[serde(rename = "change1WeekPercent")]
    pub change_1_week_percent: f64,
}

impl Quote {
    pub fn company_name(&self) -> &str {
        &self.basic.name
    }

    pub fn symbol(&self) -> &str {
        &self.basic.symbol
    }

    pub fn currency(&self) -> &str {
        &self.basic.currency
    }
}

/// File name or URL of a pre-rendered price/volume chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartReference {
    #[serde(rename = "chartFileName")]
    pub chart_file_name: String,
}

impl ChartReference {
    pub fn as_str(&self) -> &str {
        &self.chart_file_name
    }
}
