// fetcher.rs
use crate::config::DemographicsConfig;
use crate::demographics::models::{is_valid_zip, DemographicFilterSpec, DemographicRecord, Metric};
use crate::demographics::FetchError;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::{Duration, Instant};

/// Source of demographic data.
///
/// Both lookups are best effort: failures come back as `None` or an
/// empty list and are never raised to the caller.
pub trait DemographicFetcher: Send + Sync {
    fn fetch_by_zip(&self, zip: &str) -> Option<DemographicRecord>;

    fn search_zips_by_filter(&self, spec: &DemographicFilterSpec) -> Vec<String>;
}

/// Scrapes zipwho-style pages.
pub struct ZipWhoFetcher {
    client: Client,
    base_url: String,
    zip_timeout: Duration,
    search_timeout: Duration,
}

impl ZipWhoFetcher {
    pub fn new(config: &DemographicsConfig) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            zip_timeout: config.zip_timeout(),
            search_timeout: config.search_timeout(),
        })
    }

    fn fetch_html(&self, params: &[(&str, &str)], timeout: Duration) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .query(params)
            .timeout(timeout)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(resp.text()?)
    }

    fn try_fetch_by_zip(&self, zip: &str) -> Result<DemographicRecord, FetchError> {
        let html = self.fetch_html(&[("zip", zip), ("mode", "zip")], self.zip_timeout)?;
        parse_zip_page(zip, &html)
    }

    fn try_search(&self, spec: &DemographicFilterSpec) -> Result<Vec<String>, FetchError> {
        let filters = spec.to_filter_param();
        let html = self.fetch_html(
            &[
                ("mode", "demo"),
                ("filters", filters.as_str()),
                ("state", spec.state_code.as_str()),
            ],
            self.search_timeout,
        )?;
        parse_search_page(&html)
    }
}

impl DemographicFetcher for ZipWhoFetcher {
    fn fetch_by_zip(&self, zip: &str) -> Option<DemographicRecord> {
        let start = Instant::now();
        match self.try_fetch_by_zip(zip) {
            Ok(record) => {
                tracing::info!(zip, elapsed = ?start.elapsed(), "fetched zip demographics");
                Some(record)
            }
            Err(e) => {
                tracing::warn!(zip, elapsed = ?start.elapsed(), error = %e, "zip demographics fetch failed");
                None
            }
        }
    }

    fn search_zips_by_filter(&self, spec: &DemographicFilterSpec) -> Vec<String> {
        match self.try_search(spec) {
            Ok(zips) => {
                tracing::info!(state = %spec.state_code, matched = zips.len(), "demographic zip search");
                zips
            }
            Err(e) => {
                tracing::warn!(state = %spec.state_code, error = %e, "demographic zip search failed");
                Vec::new()
            }
        }
    }
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::HtmlParse(e.to_string()))
}

/// Read the three labelled metrics out of a zip page.
pub fn parse_zip_page(zip: &str, html: &str) -> Result<DemographicRecord, FetchError> {
    let document = Html::parse_document(html);
    let td = selector("td")?;

    let read = |metric: Metric| {
        labelled_value(&document, &td, metric.page_label()).and_then(|text| parse_value(&text))
    };

    Ok(DemographicRecord {
        zip_code: zip.to_string(),
        median_income: read(Metric::MedianIncome),
        population: read(Metric::Population),
        median_age: read(Metric::MedianAge),
    })
}

/// Text of the element right after the first leaf `<td>` containing `label`.
fn labelled_value(document: &Html, td: &Selector, label: &str) -> Option<String> {
    let cell = document
        .select(td)
        .filter(|cell| cell.select(td).next().is_none())
        .find(|cell| cell.text().collect::<String>().contains(label))?;

    let value = cell.next_siblings().find_map(ElementRef::wrap)?;
    Some(value.text().collect())
}

/// First column of every table row, keeping 5-digit zips in document order.
pub fn parse_search_page(html: &str) -> Result<Vec<String>, FetchError> {
    let document = Html::parse_document(html);
    let first_cells = selector("table tr td:first-child")?;

    Ok(document
        .select(&first_cells)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .filter(|text| is_valid_zip(text))
        .collect())
}

/// Drop everything but digits and dots, then parse. Empty or garbled text is `None`.
pub fn parse_value(text: &str) -> Option<f64> {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if clean.is_empty() {
        return None;
    }
    clean.parse().ok()
}
