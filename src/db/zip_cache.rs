use crate::db::connection::Database;
use crate::demographics::DemographicRecord;
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

/// Permanent zip -> demographics cache. No expiry, no eviction.
pub trait DemographicStore: Send + Sync {
    fn get(&self, zip: &str) -> Result<Option<DemographicRecord>, ServerError>;

    /// Insert or overwrite the record keyed by its `zip_code`.
    fn put(&self, record: &DemographicRecord) -> Result<(), ServerError>;
}

/// `zip_cache` table in the main SQLite file.
#[derive(Clone, Debug)]
pub struct SqliteDemographicStore {
    db: Database,
}

impl SqliteDemographicStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl DemographicStore for SqliteDemographicStore {
    fn get(&self, zip: &str) -> Result<Option<DemographicRecord>, ServerError> {
        self.db.with_conn(|conn| {
            let record = conn
                .query_row(
                    r#"
                    SELECT zip_code, median_income, population, median_age
                    FROM zip_cache
                    WHERE zip_code = ?1
                    "#,
                    params![zip],
                    |row| {
                        Ok(DemographicRecord {
                            zip_code: row.get(0)?,
                            median_income: row.get(1)?,
                            population: row.get(2)?,
                            median_age: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(record)
        })
    }

    fn put(&self, record: &DemographicRecord) -> Result<(), ServerError> {
        let now = Utc::now().naive_utc();

        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO zip_cache (zip_code, median_income, population, median_age, cached_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(zip_code) DO UPDATE SET
                    median_income = excluded.median_income,
                    population = excluded.population,
                    median_age = excluded.median_age,
                    cached_at = excluded.cached_at
                "#,
                params![
                    &record.zip_code,
                    record.median_income,
                    record.population,
                    record.median_age,
                    now,
                ],
            )?;
            Ok(())
        })
    }
}
