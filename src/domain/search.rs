// src/domain/search.rs

use crate::db::properties::PropertyStore;
use crate::demographics::{DemographicFilterSpec, DemographicService, Metric};
use crate::domain::property::PropertyRecord;
use crate::domain::query::{PropertyColumn, PropertyQueryBuilder};
use crate::domain::states::is_excluded_territory;
use crate::errors::ServerError;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Unparseable values fall back to the defaults; `page` is at least 1
    /// and `limit` is clamped into `[1, MAX_LIMIT]`.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());

        Self {
            page: parse(page).unwrap_or(1).max(1),
            limit: parse(limit).unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

/// Parsed `GET /properties` request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySearch {
    pub status: String,
    pub state_code: Option<String>,
    pub price: NumericRange,
    pub bed: NumericRange,
    pub bath: NumericRange,
    pub acre_lot: NumericRange,
    pub house_size: NumericRange,
    pub population: NumericRange,
    pub median_income: NumericRange,
    pub median_age: NumericRange,
    pub pagination: Pagination,
}

impl PropertySearch {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ServerError> {
        let status = text(params, "status")
            .ok_or_else(|| ServerError::BadRequest("Status is required".into()))?;

        Ok(Self {
            status,
            state_code: text(params, "state_code"),
            price: range(params, "price")?,
            bed: range(params, "bed")?,
            bath: range(params, "bath")?,
            acre_lot: range(params, "acre_lot")?,
            house_size: range(params, "house_size")?,
            population: range(params, "population")?,
            median_income: range(params, "median_income")?,
            median_age: range(params, "median_age")?,
            pagination: Pagination::from_params(
                params.get("page").map(String::as_str),
                params.get("limit").map(String::as_str),
            ),
        })
    }

    pub fn has_demographic_filters(&self) -> bool {
        self.population.is_set() || self.median_income.is_set() || self.median_age.is_set()
    }

    /// The provider search to run, if any.
    ///
    /// Needs both a demographic bound and a state. Excluded territories
    /// yield `None`, which leaves the property query unconstrained by zip.
    pub fn demographic_filter(&self) -> Option<DemographicFilterSpec> {
        if !self.has_demographic_filters() {
            return None;
        }
        let state_code = self.state_code.as_deref()?;
        if is_excluded_territory(state_code) {
            tracing::debug!(state_code, "skipping demographic filter for excluded territory");
            return None;
        }

        Some(DemographicFilterSpec {
            income: Metric::MedianIncome.range(self.median_income.min, self.median_income.max),
            population: Metric::Population.range(self.population.min, self.population.max),
            age: Metric::MedianAge.range(self.median_age.min, self.median_age.max),
            state_code: state_code.to_ascii_uppercase(),
        })
    }
}

fn text(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number(params: &HashMap<String, String>, key: &str) -> Result<Option<f64>, ServerError> {
    match text(params, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| ServerError::BadRequest(format!("{key} must be a number"))),
    }
}

fn range(params: &HashMap<String, String>, field: &str) -> Result<NumericRange, ServerError> {
    Ok(NumericRange {
        min: number(params, &format!("min_{field}"))?,
        max: number(params, &format!("max_{field}"))?,
    })
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct SearchPage {
    pub info: PageInfo,
    pub results: Vec<PropertyRecord>,
}

impl SearchPage {
    pub fn new(pagination: Pagination, total: i64, results: Vec<PropertyRecord>) -> Self {
        Self {
            info: PageInfo {
                total,
                page: pagination.page,
                limit: pagination.limit,
                pages: pagination.pages(total),
            },
            results,
        }
    }

    pub fn empty(pagination: Pagination) -> Self {
        Self::new(pagination, 0, Vec::new())
    }
}

/// Run a property search, narrowing by demographic zip set when requested.
///
/// An empty zip set short-circuits to an empty page without touching the store.
pub fn execute_search(
    search: &PropertySearch,
    demographics: &DemographicService,
    store: &dyn PropertyStore,
) -> Result<SearchPage, ServerError> {
    let mut builder =
        PropertyQueryBuilder::new().equals(PropertyColumn::Status, search.status.clone());

    if let Some(spec) = search.demographic_filter() {
        let zips = demographics.search_zips_by_attributes(&spec);
        if zips.is_empty() {
            return Ok(SearchPage::empty(search.pagination));
        }
        builder = builder.one_of(PropertyColumn::ZipCode, zips);
    }

    let query = builder
        .range(PropertyColumn::Price, &search.price)
        .range(PropertyColumn::Bed, &search.bed)
        .range(PropertyColumn::Bath, &search.bath)
        .range(PropertyColumn::AcreLot, &search.acre_lot)
        .range(PropertyColumn::HouseSize, &search.house_size)
        .build(search.pagination);

    let total = store.count(&query)?;
    let results = store.search(&query)?;

    Ok(SearchPage::new(search.pagination, total, results))
}
