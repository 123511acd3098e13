use crate::db::connection::Database;
use crate::domain::property::{NewProperty, PropertyRecord};
use crate::domain::query::PropertyQuery;
use crate::errors::ServerError;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const PROPERTY_COLUMNS: &str = "id, status, price, bed, bath, acre_lot, full_address, street, \
     city, state, zip_code, house_size, sold_date, state_code, price_per_sq_ft, price_per_acre";

/// Read side of the listings table.
pub trait PropertyStore: Send + Sync {
    fn search(&self, query: &PropertyQuery) -> Result<Vec<PropertyRecord>, ServerError>;

    fn count(&self, query: &PropertyQuery) -> Result<i64, ServerError>;

    fn find_by_id(&self, id: i64) -> Result<Option<PropertyRecord>, ServerError>;
}

#[derive(Clone, Debug)]
pub struct SqlitePropertyStore {
    db: Database,
}

impl SqlitePropertyStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PropertyStore for SqlitePropertyStore {
    fn search(&self, query: &PropertyQuery) -> Result<Vec<PropertyRecord>, ServerError> {
        let sql = format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties{} ORDER BY id LIMIT ? OFFSET ?",
            query.where_clause()
        );

        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(query.paged_params()), property_from_row)?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    fn count(&self, query: &PropertyQuery) -> Result<i64, ServerError> {
        let sql = format!("SELECT COUNT(*) FROM properties{}", query.where_clause());

        self.db.with_conn(|conn| {
            let total = conn.query_row(&sql, params_from_iter(query.filter_params()), |row| {
                row.get(0)
            })?;
            Ok(total)
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<PropertyRecord>, ServerError> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?1");

        self.db.with_conn(|conn| {
            let record = conn
                .query_row(&sql, params![id], property_from_row)
                .optional()?;
            Ok(record)
        })
    }
}

fn property_from_row(row: &Row<'_>) -> rusqlite::Result<PropertyRecord> {
    Ok(PropertyRecord {
        id: row.get("id")?,
        status: row.get("status")?,
        price: row.get("price")?,
        bed: row.get("bed")?,
        bath: row.get("bath")?,
        acre_lot: row.get("acre_lot")?,
        full_address: row.get("full_address")?,
        street: row.get("street")?,
        city: row.get("city")?,
        state: row.get("state")?,
        zip_code: row.get("zip_code")?,
        house_size: row.get("house_size")?,
        sold_date: row.get("sold_date")?,
        state_code: row.get("state_code")?,
        price_per_sq_ft: row.get("price_per_sq_ft")?,
        price_per_acre: row.get("price_per_acre")?,
    })
}

/// Remove every listing. Used before a full re-ingest.
pub fn clear_properties(conn: &Connection) -> Result<usize, ServerError> {
    Ok(conn.execute("DELETE FROM properties", [])?)
}

/// Insert a batch of listings inside one transaction.
pub fn insert_properties(db: &Database, properties: &[NewProperty]) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO properties (
                    status, price, bed, bath, acre_lot, full_address, street, city, state,
                    zip_code, house_size, sold_date, state_code, price_per_sq_ft, price_per_acre
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                "#,
            )?;

            for prop in properties {
                stmt.execute(params![
                    &prop.status,
                    prop.price,
                    prop.bed,
                    prop.bath,
                    prop.acre_lot,
                    &prop.full_address,
                    &prop.street,
                    &prop.city,
                    &prop.state,
                    &prop.zip_code,
                    prop.house_size,
                    &prop.sold_date,
                    &prop.state_code,
                    prop.price_per_sq_ft,
                    prop.price_per_acre,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    })
}
