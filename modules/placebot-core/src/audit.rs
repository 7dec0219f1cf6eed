use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use foursquare_client::Place;
use serde::Serialize;

use crate::error::PlacebotError;

/// Snapshot of one provider call, serialized as a standalone JSON file.
#[derive(Debug, Serialize)]
struct QueryLog<'a> {
    timestamp: String,
    query: &'a str,
    latitude: f64,
    longitude: f64,
    results: &'a [Place],
}

/// Write-once audit trail of places searches.
///
/// Filenames are timestamp-derived so entries are never overwritten, and
/// nothing in the service reads them back. Write failures are surfaced as
/// errors; the engine logs and swallows them so auditing can never block a
/// response.
#[derive(Debug, Clone)]
pub struct AuditLog {
    dir: PathBuf,
}

impl AuditLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Record one search. Creates the log directory on demand and returns the
    /// path written.
    pub fn record(
        &self,
        query: &str,
        latitude: f64,
        longitude: f64,
        results: &[Place],
    ) -> Result<PathBuf, PlacebotError> {
        let now = Utc::now();
        let entry = QueryLog {
            timestamp: now.to_rfc3339(),
            query,
            latitude,
            longitude,
            results,
        };

        fs::create_dir_all(&self.dir).map_err(|e| PlacebotError::AuditWrite(e.to_string()))?;

        let path = self
            .dir
            .join(format!("foursquare_{}.json", now.format("%Y%m%d_%H%M%S")));
        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| PlacebotError::AuditWrite(e.to_string()))?;
        fs::write(&path, json).map_err(|e| PlacebotError::AuditWrite(e.to_string()))?;

        Ok(path)
    }
}
