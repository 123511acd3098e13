//! Bulk load of the realtor CSV export into the `properties` table.
//!
//! Rows are streamed, normalized, and written in fixed-size transactions.
//! Existing listings are removed first so a run always reflects one export.
//! A source that fails mid-stream aborts the run with an error; only
//! malformed records are skipped.

mod rows;

pub use rows::CsvRow;

use crate::config::IngestConfig;
use crate::db::connection::Database;
use crate::db::properties::{clear_properties, insert_properties};
use crate::errors::ServerError;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::Read;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not open source: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Db(#[from] ServerError),
}

/// Load listings from a URL or a local file path. Returns rows inserted.
pub fn ingest(
    db: &Database,
    source: &str,
    config: &IngestConfig,
    user_agent: &str,
) -> Result<usize, IngestError> {
    tracing::info!(source, "starting ingestion");
    let reader = open_source(source, config, user_agent)?;
    ingest_reader(db, reader, config.batch_size)
}

fn open_source(
    source: &str,
    config: &IngestConfig,
    user_agent: &str,
) -> Result<Box<dyn Read>, IngestError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        // The total timeout covers reading the body, so it is unset by default.
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(config.connect_timeout())
            .timeout(config.download_timeout())
            .build()?;
        let resp = client.get(source).send()?.error_for_status()?;
        Ok(Box::new(resp))
    } else {
        Ok(Box::new(File::open(source)?))
    }
}

pub fn ingest_reader<R: Read>(
    db: &Database,
    reader: R,
    batch_size: usize,
) -> Result<usize, IngestError> {
    let start = Instant::now();
    let batch_size = batch_size.max(1);

    let removed = db.with_conn(|conn| clear_properties(conn))?;
    tracing::info!(removed, "cleared existing properties");

    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut batch = Vec::with_capacity(batch_size);
    let mut inserted = 0;
    let mut skipped = 0;

    for result in csv_reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => batch.push(row.into_property()),
            Err(e) if e.is_io_error() => {
                tracing::error!(inserted, error = %e, "source stream failed");
                return Err(IngestError::Csv(e));
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(error = %e, "skipping malformed csv record");
                continue;
            }
        }

        if batch.len() >= batch_size {
            insert_properties(db, &batch)?;
            inserted += batch.len();
            batch.clear();
            tracing::info!(inserted, "processing rows");
        }
    }

    if !batch.is_empty() {
        insert_properties(db, &batch)?;
        inserted += batch.len();
    }

    tracing::info!(inserted, skipped, elapsed = ?start.elapsed(), "ingestion complete");
    Ok(inserted)
}
