use crate::cli::{Cli, Unit};
use crate::domain::models::HomeLocation;
use crate::error::Result;
use crate::services::api::{ParkSource, PotaClient};
use crate::services::cache::ResponseCache;
use crate::services::geo::resolve_home;
use crate::services::output::render_report;
use crate::services::progress::{rank_parks, resolve_activation_status};
use std::time::Duration;

pub fn handle_report(cli: &Cli) -> Result<String> {
    let home = resolve_home(cli.lat.as_deref(), cli.lon.as_deref(), cli.grid.as_deref())?;
    tracing::debug!(latitude = home.latitude, longitude = home.longitude, "home resolved");

    let cache = if cli.no_cache {
        None
    } else {
        let dir = match &cli.cache_dir {
            Some(d) => Some(d.clone()),
            None => ResponseCache::default_dir()
                .map_err(|e| tracing::warn!(error = %e, "running without a response cache"))
                .ok(),
        };
        dir.map(|dir| {
            ResponseCache::new(
                dir,
                Duration::from_secs(cli.cache_ttl_hours.saturating_mul(60 * 60)),
            )
        })
    };
    let client = PotaClient::new(
        &cli.api_base,
        Duration::from_secs(cli.timeout_secs),
        cache,
    )?;

    run_report(&client, &home, &cli.callsign, cli.unit, cli.count as usize)
}

pub fn run_report(
    source: &dyn ParkSource,
    home: &HomeLocation,
    callsign: &str,
    unit: Unit,
    count: usize,
) -> Result<String> {
    let parks = source.nearby_parks(home)?;
    tracing::debug!(found = parks.len(), "nearby parks fetched");

    let mut ranked = rank_parks(home, parks, unit, count);
    resolve_activation_status(source, callsign, &mut ranked)?;

    Ok(render_report(home, callsign, unit, &ranked))
}
