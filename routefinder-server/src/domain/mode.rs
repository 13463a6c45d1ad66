//! Transport modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A transport mode the routing API can answer for.
///
/// The set is closed: every interaction resolves all modes in
/// [`TravelMode::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Walking,
    Car,
    HeavyTruck,
}

impl TravelMode {
    /// Every mode, in the order results are reported.
    pub const ALL: [TravelMode; 3] = [TravelMode::Walking, TravelMode::Car, TravelMode::HeavyTruck];

    /// Routing API profile name.
    pub fn profile(self) -> &'static str {
        match self {
            TravelMode::Walking => "foot-walking",
            TravelMode::Car => "driving-car",
            TravelMode::HeavyTruck => "driving-hgv",
        }
    }

    /// Label shown in the info panel and popups.
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Walking => "Marche",
            TravelMode::Car => "Voiture",
            TravelMode::HeavyTruck => "Camion",
        }
    }

    /// Bullet colour in the info panel.
    pub fn color(self) -> &'static str {
        match self {
            TravelMode::Walking => "cyan",
            TravelMode::Car => "pink",
            TravelMode::HeavyTruck => "orange",
        }
    }

    /// Suffix for the `route-*` and `point-*` CSS classes.
    pub fn css_suffix(self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_routing_api() {
        let profiles: Vec<_> = TravelMode::ALL.iter().map(|m| m.profile()).collect();
        assert_eq!(profiles, vec!["foot-walking", "driving-car", "driving-hgv"]);
    }

    #[test]
    fn order_is_walking_car_truck() {
        assert_eq!(
            TravelMode::ALL,
            [TravelMode::Walking, TravelMode::Car, TravelMode::HeavyTruck]
        );
    }

    #[test]
    fn display_attributes() {
        assert_eq!(TravelMode::Car.color(), "pink");
        assert_eq!(TravelMode::Walking.color(), "cyan");
        assert_eq!(TravelMode::HeavyTruck.color(), "orange");
        assert_eq!(TravelMode::HeavyTruck.css_suffix(), "camion");
        assert_eq!(TravelMode::Car.to_string(), "Voiture");
    }
}
