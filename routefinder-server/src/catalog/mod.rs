//! Dataset catalog.
//!
//! The catalog is a JSON report mapping a key to a zone/points pair:
//!
//! ```json
//! { "paris": { "Zone":   { "name": "Paris", "source": "data/paris.fgb" },
//!              "Points": { "name": "Casernes", "source": "data/casernes.fgb" } } }
//! ```
//!
//! Entries missing a field are logged and skipped.

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::geodata::DataSource;

pub use error::CatalogError;

/// One selectable zone/points pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOption {
    pub key: String,
    pub label: String,
    pub zone_source: String,
    pub points_source: String,
}

impl DatasetOption {
    pub fn zone(&self) -> DataSource {
        DataSource::parse(&self.zone_source)
    }

    pub fn points(&self) -> DataSource {
        DataSource::parse(&self.points_source)
    }
}

#[derive(Debug, Deserialize)]
struct LayerEntry {
    name: String,
    source: String,
}

#[derive(Debug, Deserialize)]
struct ReportEntry {
    #[serde(rename = "Zone")]
    zone: LayerEntry,
    #[serde(rename = "Points")]
    points: LayerEntry,
}

/// Ordered list of dataset options, in file order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DatasetCatalog {
    options: Vec<DatasetOption>,
}

impl DatasetCatalog {
    /// Read and parse the report at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let catalog = Self::from_json(&text)?;
        info!(path = %path.display(), datasets = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a report. Malformed entries are skipped.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let report: Map<String, Value> =
            serde_json::from_str(text).map_err(|e| CatalogError::Json(e.to_string()))?;

        let mut options = Vec::with_capacity(report.len());
        for (key, value) in report {
            match serde_json::from_value::<ReportEntry>(value) {
                Ok(entry) => options.push(DatasetOption {
                    label: format!("{} - {}", entry.zone.name, entry.points.name),
                    zone_source: entry.zone.source,
                    points_source: entry.points.source,
                    key,
                }),
                Err(e) => error!(%key, error = %e, "Skipping malformed catalog entry"),
            }
        }

        debug!(?options, "Dataset options prepared");
        Ok(Self { options })
    }

    pub fn options(&self) -> &[DatasetOption] {
        &self.options
    }

    pub fn get(&self, key: &str) -> Option<&DatasetOption> {
        self.options.iter().find(|o| o.key == key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
