// src/domain/property.rs

use crate::demographics::DemographicRecord;
use serde::Serialize;
use utoipa::ToSchema;

/// A listing as stored in the `properties` table.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertyRecord {
    pub id: i64,
    pub status: Option<String>,
    pub price: Option<f64>,
    pub bed: Option<i64>,
    pub bath: Option<i64>,
    pub acre_lot: Option<f64>,
    pub full_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub house_size: Option<f64>,
    pub sold_date: Option<String>,
    pub state_code: Option<String>,
    pub price_per_sq_ft: Option<f64>,
    pub price_per_acre: Option<f64>,
}

/// A listing ready to insert. Derived ratios are filled in by `with_derived_fields`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewProperty {
    pub status: Option<String>,
    pub price: f64,
    pub bed: Option<i64>,
    pub bath: Option<i64>,
    pub acre_lot: f64,
    pub full_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub house_size: f64,
    pub sold_date: Option<String>,
    pub state_code: Option<String>,
    pub price_per_sq_ft: Option<f64>,
    pub price_per_acre: Option<f64>,
}

impl NewProperty {
    pub fn with_derived_fields(mut self) -> Self {
        self.price_per_sq_ft = price_ratio(self.price, self.house_size);
        self.price_per_acre = price_ratio(self.price, self.acre_lot);
        self
    }
}

/// `price / per` when both are positive.
pub fn price_ratio(price: f64, per: f64) -> Option<f64> {
    if price > 0.0 && per > 0.0 {
        Some(price / per)
    } else {
        None
    }
}

/// Property detail response. `zip_info` is omitted unless it was requested,
/// and is `null` when the lookup came back empty.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: PropertyRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<DemographicRecord>)]
    pub zip_info: Option<Option<DemographicRecord>>,
}
