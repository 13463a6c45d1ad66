//! Fetching datasets from URLs or local paths.

use std::path::PathBuf;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use super::decode::{RawFeature, decode, detect_format};
use super::error::GeoDataError;
use super::layer::{PointLayer, ZoneLayer};

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }

    /// Display form, also used as the layer's source label.
    pub fn location(&self) -> String {
        match self {
            DataSource::Url(url) => url.clone(),
            DataSource::Path(path) => path.display().to_string(),
        }
    }
}

/// Loads and validates datasets.
#[derive(Debug, Clone, Default)]
pub struct GeoDataLoader {
    http: reqwest::Client,
}

impl GeoDataLoader {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Read the raw bytes and any reported content type.
    async fn fetch(&self, source: &DataSource) -> Result<(Vec<u8>, Option<String>), GeoDataError> {
        match source {
            DataSource::Url(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GeoDataError::Status {
                        location: url.clone(),
                        status: status.as_u16(),
                    });
                }
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                let bytes = response.bytes().await?;
                Ok((bytes.to_vec(), content_type))
            }
            DataSource::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| GeoDataError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                Ok((bytes, None))
            }
        }
    }

    /// Fetch and decode without validating the geometry kind.
    async fn features(&self, source: &DataSource) -> Result<(String, Vec<RawFeature>), GeoDataError> {
        let location = source.location();
        debug!(%location, "Loading dataset");

        let (bytes, content_type) = self.fetch(source).await?;
        let format = detect_format(&location, content_type.as_deref(), &bytes)?;
        let features = decode(format, &bytes)?;
        debug!(%location, ?format, features = features.len(), "Decoded dataset");

        Ok((location, features))
    }

    pub async fn load_zone(&self, source: &DataSource) -> Result<ZoneLayer, GeoDataError> {
        let (location, features) = self.features(source).await?;
        let layer = ZoneLayer::from_features(location, features)?;
        info!(location = layer.source(), zones = layer.zones().len(), "Zone loaded");
        Ok(layer)
    }

    pub async fn load_points(&self, source: &DataSource) -> Result<PointLayer, GeoDataError> {
        let (location, features) = self.features(source).await?;
        let layer = PointLayer::from_features(location, features)?;
        info!(location = layer.source(), points = layer.len(), "Points loaded");
        Ok(layer)
    }
}
