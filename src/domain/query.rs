// src/domain/query.rs

use crate::domain::search::{NumericRange, Pagination};
use rusqlite::types::Value;

/// Columns a search may constrain. Only these names ever reach SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyColumn {
    Status,
    ZipCode,
    Price,
    Bed,
    Bath,
    AcreLot,
    HouseSize,
}

impl PropertyColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            PropertyColumn::Status => "status",
            PropertyColumn::ZipCode => "zip_code",
            PropertyColumn::Price => "price",
            PropertyColumn::Bed => "bed",
            PropertyColumn::Bath => "bath",
            PropertyColumn::AcreLot => "acre_lot",
            PropertyColumn::HouseSize => "house_size",
        }
    }
}

/// A filtered, paged property query. Predicates use `?` placeholders and
/// `params` holds the bound values in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    predicates: Vec<String>,
    params: Vec<Value>,
    pub limit: i64,
    pub offset: i64,
}

impl PropertyQuery {
    /// Values for the `WHERE` placeholders only.
    pub fn filter_params(&self) -> &[Value] {
        &self.params
    }

    /// Filter values followed by `LIMIT` and `OFFSET`.
    pub fn paged_params(&self) -> Vec<Value> {
        let mut params = self.params.clone();
        params.push(Value::Integer(self.limit));
        params.push(Value::Integer(self.offset));
        params
    }

    /// ` WHERE a AND b`, or an empty string when unfiltered.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }
}

/// Accumulates (predicate, bound value) pairs for a property search.
#[derive(Debug, Default)]
pub struct PropertyQueryBuilder {
    predicates: Vec<String>,
    params: Vec<Value>,
}

impl PropertyQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, column: PropertyColumn, value: impl Into<Value>) -> Self {
        self.predicates.push(format!("{} = ?", column.as_sql()));
        self.params.push(value.into());
        self
    }

    /// Inclusive bounds; a missing side adds nothing.
    pub fn range(mut self, column: PropertyColumn, range: &NumericRange) -> Self {
        if let Some(min) = range.min {
            self.predicates.push(format!("{} >= ?", column.as_sql()));
            self.params.push(Value::Real(min));
        }
        if let Some(max) = range.max {
            self.predicates.push(format!("{} <= ?", column.as_sql()));
            self.params.push(Value::Real(max));
        }
        self
    }

    /// Membership in `values`. An empty set matches nothing.
    pub fn one_of<I>(mut self, column: PropertyColumn, values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let start = self.params.len();
        self.params.extend(values.into_iter().map(Value::Text));
        let count = self.params.len() - start;

        if count == 0 {
            self.predicates.push("1 = 0".to_string());
        } else {
            let placeholders = vec!["?"; count].join(", ");
            self.predicates
                .push(format!("{} IN ({placeholders})", column.as_sql()));
        }
        self
    }

    pub fn build(self, pagination: Pagination) -> PropertyQuery {
        PropertyQuery {
            predicates: self.predicates,
            params: self.params,
            limit: pagination.limit,
            offset: pagination.offset(),
        }
    }
}
