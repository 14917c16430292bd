use crate::domain::models::{
    ActivationRecord, ActivatorEntry, HomeLocation, Park, ParkFeatureCollection, Profile,
};
use crate::error::{ProgressError, Result};
use crate::services::cache::ResponseCache;
use crate::services::geo::format_coordinate;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Half-width of the park search box around home, in degrees.
pub const SEARCH_RADIUS_DEG: f64 = 1.0;

/// Read-only view of the park data the report needs.
pub trait ParkSource {
    fn nearby_parks(&self, home: &HomeLocation) -> Result<Vec<Park>>;
    fn recent_activations(&self, callsign: &str) -> Result<Vec<ActivationRecord>>;
    fn park_activators(&self, reference: &str) -> Result<Vec<ActivatorEntry>>;
}

pub struct PotaClient {
    http: reqwest::blocking::Client,
    base: String,
    cache: Option<ResponseCache>,
}

impl PotaClient {
    pub fn new(base: &str, timeout: Duration, cache: Option<ResponseCache>) -> Result<Self> {
        let base = base.trim_end_matches('/').to_string();
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pota-progress/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ProgressError::Http {
                url: base.clone(),
                source,
            })?;
        Ok(Self { http, base, cache })
    }

    // The trailing `/0` is required by the endpoint; its meaning is undocumented.
    pub fn bounding_box_url(&self, home: &HomeLocation) -> String {
        format!(
            "{}/park/grids/{}/{}/{}/{}/0",
            self.base,
            format_coordinate(home.latitude - SEARCH_RADIUS_DEG),
            format_coordinate(home.longitude - SEARCH_RADIUS_DEG),
            format_coordinate(home.latitude + SEARCH_RADIUS_DEG),
            format_coordinate(home.longitude + SEARCH_RADIUS_DEG)
        )
    }

    pub fn profile_url(&self, callsign: &str) -> String {
        format!("{}/profile/{}", self.base, callsign)
    }

    pub fn activations_url(&self, reference: &str) -> String {
        format!("{}/park/activations/{}?count=all", self.base, reference)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url) {
                tracing::debug!(url, "cache hit");
                return Ok(body);
            }
            tracing::debug!(url, "cache miss");
        }

        tracing::info!(url, "GET");
        let http_err = |source| ProgressError::Http {
            url: url.to_string(),
            source,
        };
        let resp = self.http.get(url).send().map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProgressError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(http_err)?;

        if let Some(cache) = &self.cache {
            // A failed write only costs a refetch next run.
            if let Err(e) = cache.put(url, &body) {
                tracing::warn!(url, error = %e, "could not store response in cache");
            }
        }
        Ok(body)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, endpoint: &str) -> Result<T> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|source| ProgressError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

impl ParkSource for PotaClient {
    fn nearby_parks(&self, home: &HomeLocation) -> Result<Vec<Park>> {
        let url = self.bounding_box_url(home);
        let collection: ParkFeatureCollection = self.get_json(&url, "park/grids")?;
        parks_from_features(collection)
    }

    fn recent_activations(&self, callsign: &str) -> Result<Vec<ActivationRecord>> {
        let profile: Profile = self.get_json(&self.profile_url(callsign), "profile")?;
        Ok(profile.recent_activity.activations)
    }

    fn park_activators(&self, reference: &str) -> Result<Vec<ActivatorEntry>> {
        self.get_json(&self.activations_url(reference), "park/activations")
    }
}

pub fn parks_from_features(collection: ParkFeatureCollection) -> Result<Vec<Park>> {
    collection
        .features
        .into_iter()
        .map(|f| match f.geometry.coordinates.as_slice() {
            [longitude, latitude, ..] => Ok(Park {
                reference: f.properties.reference,
                name: f.properties.name,
                longitude: *longitude,
                latitude: *latitude,
            }),
            _ => Err(ProgressError::Decode {
                endpoint: "park/grids".to_string(),
                source: serde::de::Error::custom(format!(
                    "park {} has fewer than two coordinates",
                    f.properties.reference
                )),
            }),
        })
        .collect()
}
