//! Serializable view state handed to the map glue and the templates.

use serde::Serialize;

use crate::domain::{LatLng, TravelMode};
use crate::geodata::Bounds;
use crate::route::Route;
use crate::travel::TravelResult;

/// Info panel heading.
pub const INFO_TITLE: &str = "Temps de Trajet";

/// Shown while the panel has no rows.
pub const INFO_PLACEHOLDER: &str = "Cliquez sur la carte pour voir les temps de trajet.";

/// A coloured marker drawn over the fastest point for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastestMarker {
    pub mode: TravelMode,
    pub location: LatLng,
    /// e.g. `point-camion`
    pub css_class: String,
    /// e.g. `Camion : Caserne Nord`
    pub popup: String,
}

impl FastestMarker {
    pub fn from_result(result: &TravelResult) -> Self {
        let mode = result.mode;
        Self {
            mode,
            location: result.destination.location,
            css_class: format!("point-{}", mode.css_suffix()),
            popup: format!("{} : {}", mode.label(), result.destination.display_name()),
        }
    }
}

/// One line of the info panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoRow {
    pub mode: String,
    pub color: &'static str,
    pub point_name: String,
    pub duration: String,
}

impl InfoRow {
    pub fn from_result(result: &TravelResult) -> Self {
        Self {
            mode: result.mode.label().to_string(),
            color: result.color,
            point_name: result.destination.display_name(),
            duration: result.formatted.clone(),
        }
    }
}

/// Info panel contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub title: &'static str,
    /// Set only when `rows` is empty.
    pub placeholder: Option<&'static str>,
    pub rows: Vec<InfoRow>,
}

impl InfoPanel {
    pub fn new(rows: Vec<InfoRow>) -> Self {
        let placeholder = rows.is_empty().then_some(INFO_PLACEHOLDER);
        Self {
            title: INFO_TITLE,
            placeholder,
            rows,
        }
    }
}

/// Everything the client needs to redraw the overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub dataset: Option<String>,
    pub zone_loaded: bool,
    pub point_count: usize,
    pub zone_bounds: Option<Bounds>,
    pub interaction: u64,
    pub intervention: Option<LatLng>,
    pub fastest_points: Vec<FastestMarker>,
    pub routes: Vec<Route>,
    pub info: InfoPanel,
}
