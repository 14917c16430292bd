use crate::cli::Unit;
use crate::domain::models::{ActivationRecord, HomeLocation, Park, RankedPark};
use crate::error::Result;
use crate::services::api::ParkSource;
use crate::services::geo::haversine_distance;

/// Annotates each park with its distance from home, sorts nearest-first and
/// keeps at most `count`. Every kept park starts out not activated.
pub fn rank_parks(home: &HomeLocation, parks: Vec<Park>, unit: Unit, count: usize) -> Vec<RankedPark> {
    let mut ranked: Vec<RankedPark> = parks
        .into_iter()
        .map(|park| RankedPark {
            distance_from_home: haversine_distance(home, park.latitude, park.longitude, unit),
            park,
            activated: false,
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_from_home.total_cmp(&b.distance_from_home));
    ranked.truncate(count);
    ranked
}

pub fn mark_recent_activations(parks: &mut [RankedPark], activations: &[ActivationRecord]) {
    for park in parks.iter_mut() {
        if activations.iter().any(|a| a.reference == park.park.reference) {
            park.activated = true;
        }
    }
}

/// Checks each park's activator roll call for `callsign` (exact match).
/// One request per park, in rank order; any failure aborts the whole pass.
pub fn mark_roll_call_activations(
    source: &dyn ParkSource,
    callsign: &str,
    parks: &mut [RankedPark],
) -> Result<()> {
    for park in parks.iter_mut() {
        let activators = source.park_activators(park.reference())?;
        if activators.iter().any(|a| a.callsign == callsign) {
            park.activated = true;
        }
    }
    Ok(())
}

/// Merges both evidence sources; a park is activated if either one says so.
pub fn resolve_activation_status(
    source: &dyn ParkSource,
    callsign: &str,
    parks: &mut [RankedPark],
) -> Result<()> {
    // The profile only carries recent activity, so it is never treated as complete.
    let recent = source.recent_activations(callsign)?;
    mark_recent_activations(parks, &recent);
    mark_roll_call_activations(source, callsign, parks)?;
    tracing::debug!(
        activated = parks.iter().filter(|p| p.activated).count(),
        total = parks.len(),
        "activation status resolved"
    );
    Ok(())
}
