//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::DatasetCatalog;
use crate::config::AppConfig;
use crate::geodata::GeoDataLoader;
use crate::interaction::ClickPipeline;
use crate::ors::{OrsClient, OrsError};
use crate::route::RouteFetcher;
use crate::travel::TravelTimeResolver;
use crate::view::MapView;

/// Click pipeline backed by the routing API for both stages.
pub type OrsPipeline = ClickPipeline<OrsClient, OrsClient>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Nearest points, travel times and routes
    pub pipeline: Arc<OrsPipeline>,

    /// Dataset fetching and decoding
    pub loader: Arc<GeoDataLoader>,

    /// Selectable datasets
    pub catalog: Arc<DatasetCatalog>,

    /// The session's map
    pub view: Arc<Mutex<MapView>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: OrsPipeline, loader: GeoDataLoader, catalog: DatasetCatalog) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            loader: Arc::new(loader),
            catalog: Arc::new(catalog),
            view: Arc::new(Mutex::new(MapView::new())),
        }
    }

    /// Wire one routing client into the resolver and the route fetcher.
    pub fn from_config(config: &AppConfig, catalog: DatasetCatalog) -> Result<Self, OrsError> {
        let client = OrsClient::new(config.ors.clone())?;
        let pipeline = ClickPipeline::new(
            TravelTimeResolver::new(client.clone(), &config.cache),
            RouteFetcher::new(client),
        );
        Ok(Self::new(pipeline, GeoDataLoader::default(), catalog))
    }
}
