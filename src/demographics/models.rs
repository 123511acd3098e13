use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Demographics for one zip code as scraped from the provider.
///
/// `None` fields mean the value could not be read from the provider's
/// page. An unknown zip and an unparseable page look the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemographicRecord {
    pub zip_code: String,
    pub median_income: Option<f64>,
    pub population: Option<f64>,
    pub median_age: Option<f64>,
}

impl DemographicRecord {
    /// Whether the record carries the income figure the public endpoint requires.
    pub fn has_income(&self) -> bool {
        self.median_income.is_some()
    }
}

/// A closed numeric range used in provider search filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

/// The three metrics the provider can filter on, in the order it expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MedianIncome,
    Population,
    MedianAge,
}

impl Metric {
    /// Name used inside the provider's `filters` parameter.
    pub fn filter_name(self) -> &'static str {
        match self {
            Metric::MedianIncome => "MedianIncome",
            Metric::Population => "Population",
            Metric::MedianAge => "MedianAge",
        }
    }

    /// Label of the table cell holding this metric on a zip page.
    pub fn page_label(self) -> &'static str {
        match self {
            Metric::MedianIncome => "Median Income",
            Metric::Population => "Population",
            Metric::MedianAge => "Median Age",
        }
    }

    /// Upper bound substituted when the caller gives no maximum.
    pub fn default_max(self) -> f64 {
        match self {
            Metric::MedianIncome => 999_999.0,
            Metric::Population => 9_999_999.0,
            Metric::MedianAge => 99.0,
        }
    }

    pub fn range(self, min: Option<f64>, max: Option<f64>) -> MetricRange {
        MetricRange {
            min: min.unwrap_or(0.0),
            max: max.unwrap_or_else(|| self.default_max()),
        }
    }
}

/// Demographic constraints for a zip search within one state.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicFilterSpec {
    pub income: MetricRange,
    pub population: MetricRange,
    pub age: MetricRange,
    pub state_code: String,
}

impl DemographicFilterSpec {
    /// Encode the ranges as `Metric-min-max` segments joined by `_`.
    pub fn to_filter_param(&self) -> String {
        [
            (Metric::MedianIncome, self.income),
            (Metric::Population, self.population),
            (Metric::MedianAge, self.age),
        ]
        .iter()
        .map(|(metric, range)| format!("{}-{}-{}", metric.filter_name(), range.min, range.max))
        .collect::<Vec<_>>()
        .join("_")
    }
}

/// Five ASCII digits, nothing else.
pub fn is_valid_zip(text: &str) -> bool {
    text.len() == 5 && text.bytes().all(|b| b.is_ascii_digit())
}
