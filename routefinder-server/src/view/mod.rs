//! Session map state.
//!
//! [`MapView`] is the single owner of the active layers and the
//! per-click overlays. Dataset selection and clicks go through it, and
//! the client redraws from its [`ViewSnapshot`].

mod snapshot;

use std::sync::Arc;

use tracing::debug;

use crate::domain::{LatLng, Point};
use crate::geodata::{PointLayer, ZoneLayer};
use crate::interaction::{CancelToken, InteractionError, InteractionOutcome, InteractionTracker};
use crate::route::Route;

pub use snapshot::{
    FastestMarker, INFO_PLACEHOLDER, INFO_TITLE, InfoPanel, InfoRow, ViewSnapshot,
};

/// Active layers plus the overlays of the latest click.
#[derive(Debug, Default)]
pub struct MapView {
    dataset: Option<String>,
    zone: Option<Arc<ZoneLayer>>,
    points: Option<Arc<PointLayer>>,
    tracker: InteractionTracker,
    intervention: Option<LatLng>,
    fastest_points: Vec<FastestMarker>,
    routes: Vec<Route>,
    info_rows: Vec<InfoRow>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop both layers and every overlay.
    ///
    /// Any in-flight click is cancelled; its outcome will be rejected.
    pub fn clear_for_dataset(&mut self, key: Option<String>) {
        debug!(dataset = ?key, "clearing view for dataset change");
        self.dataset = key;
        self.zone = None;
        self.points = None;
        self.tracker.begin();
        self.clear_overlays();
        self.intervention = None;
    }

    /// Replace the active zone layer.
    pub fn set_zone(&mut self, layer: Arc<ZoneLayer>) {
        self.zone = Some(layer);
    }

    /// Replace the active point layer.
    pub fn set_points(&mut self, layer: Arc<PointLayer>) {
        self.points = Some(layer);
    }

    /// Points a click should search, empty when no layer is loaded.
    pub fn candidate_points(&self) -> Arc<[Point]> {
        self.points
            .as_ref()
            .map(|layer| layer.shared_points())
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Start a click: move the intervention marker and clear the previous
    /// click's overlays.
    pub fn begin_interaction(&mut self, click: LatLng) -> CancelToken {
        let token = self.tracker.begin();
        debug!(id = token.id(), %click, "interaction started");
        self.intervention = Some(click);
        self.clear_overlays();
        token
    }

    /// Write a finished click into the view.
    ///
    /// Rejected if another click or a dataset change happened meanwhile.
    pub fn apply_outcome(&mut self, outcome: &InteractionOutcome) -> Result<(), InteractionError> {
        if !self.tracker.is_current(outcome.id) {
            return Err(InteractionError::Superseded { id: outcome.id });
        }

        self.fastest_points = outcome.results.iter().map(FastestMarker::from_result).collect();
        self.info_rows = outcome.results.iter().map(InfoRow::from_result).collect();
        self.routes = outcome.routes.clone();
        Ok(())
    }

    pub fn info_panel(&self) -> InfoPanel {
        InfoPanel::new(self.info_rows.clone())
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            dataset: self.dataset.clone(),
            zone_loaded: self.zone.is_some(),
            point_count: self.points.as_ref().map_or(0, |p| p.len()),
            zone_bounds: self.zone.as_ref().and_then(|z| z.bounds()),
            interaction: self.tracker.current(),
            intervention: self.intervention,
            fastest_points: self.fastest_points.clone(),
            routes: self.routes.clone(),
            info: self.info_panel(),
        }
    }

    fn clear_overlays(&mut self) {
        self.fastest_points.clear();
        self.routes.clear();
        self.info_rows.clear();
    }
}
