use serde::Deserialize;

/// Resolved home coordinate, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Park {
    pub reference: String,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPark {
    pub park: Park,
    pub distance_from_home: f64,
    pub activated: bool,
}

impl RankedPark {
    pub fn reference(&self) -> &str {
        &self.park.reference
    }
}

// Wire shapes. Unknown fields are ignored; missing required ones fail decoding.

#[derive(Debug, Deserialize)]
pub struct ParkFeatureCollection {
    pub features: Vec<ParkFeature>,
}

#[derive(Debug, Deserialize)]
pub struct ParkFeature {
    pub geometry: ParkGeometry,
    pub properties: ParkProperties,
}

#[derive(Debug, Deserialize)]
pub struct ParkGeometry {
    /// `[longitude, latitude]`, optionally followed by elevation.
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ParkProperties {
    pub reference: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub recent_activity: RecentActivity,
}

#[derive(Debug, Deserialize)]
pub struct RecentActivity {
    pub activations: Vec<ActivationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivationRecord {
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivatorEntry {
    #[serde(rename = "activeCallsign")]
    pub callsign: String,
}
