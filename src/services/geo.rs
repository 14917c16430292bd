use crate::cli::Unit;
use crate::domain::models::HomeLocation;
use crate::error::{ProgressError, Result};

/// Mean Earth radius (IUGG), kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;
pub const KM_PER_MILE: f64 = 1.609344;

/// Great-circle distance between two points using the haversine formula.
pub fn haversine_distance(from: &HomeLocation, to_lat: f64, to_lon: f64, unit: Unit) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to_lat.to_radians();
    let d_phi = (to_lat - from.latitude).to_radians();
    let d_lambda = (to_lon - from.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    let km = EARTH_RADIUS_KM * c;

    match unit {
        Unit::Km => km,
        Unit::Mi => km / KM_PER_MILE,
    }
}

/// Text form of a coordinate for request paths and the report header.
/// Whole numbers keep a trailing `.0`; magnitudes below 1e-4 or from 1e16
/// use a signed two-digit exponent (`1e-07`).
pub fn format_coordinate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", value);
        return match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
            Some((mantissa, Ok(exp))) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            _ => sci,
        };
    }
    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<HomeLocation> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ProgressError::InvalidInput(format!(
            "latitude {} is outside -90..90",
            latitude
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ProgressError::InvalidInput(format!(
            "longitude {} is outside -180..180",
            longitude
        )));
    }
    Ok(HomeLocation {
        latitude,
        longitude,
    })
}

/// Picks the home coordinate: explicit lat/lon win over a grid locator.
pub fn resolve_home(
    lat: Option<&str>,
    lon: Option<&str>,
    grid: Option<&str>,
) -> Result<HomeLocation> {
    let (lat, lon) = (present(lat), present(lon));

    if lat.is_some() || lon.is_some() {
        let latitude = parse_coordinate("latitude", lat)?;
        let longitude = parse_coordinate("longitude", lon)?;
        return validate_coordinates(latitude, longitude);
    }

    match present(grid) {
        Some(locator) => grid_to_location(locator),
        None => Err(ProgressError::InvalidInput(
            "a location is required: pass --lat and --lon, or --grid".to_string(),
        )),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_coordinate(label: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw.ok_or_else(|| {
        ProgressError::InvalidInput(format!("{} is required when the other coordinate is given", label))
    })?;
    raw.parse::<f64>()
        .map_err(|_| ProgressError::InvalidInput(format!("{} '{}' is not a number", label, raw)))
}

/// Decodes a Maidenhead locator (2, 4, 6 or 8 characters) to the south-west
/// corner of the cell it names.
pub fn grid_to_location(locator: &str) -> Result<HomeLocation> {
    let fail = |reason: &str| ProgressError::Grid {
        locator: locator.to_string(),
        reason: reason.to_string(),
    };

    let chars: Vec<char> = locator.trim().to_ascii_uppercase().chars().collect();
    if chars.is_empty() || chars.len() % 2 != 0 || chars.len() > 8 {
        return Err(fail("expected 2, 4, 6 or 8 characters"));
    }

    let mut lon = -180.0;
    let mut lat = -90.0;
    for (pair, window) in chars.chunks(2).enumerate() {
        let (lon_step, lat_step, max, base) = match pair {
            0 => (20.0, 10.0, 18, 'A'),
            1 => (2.0, 1.0, 10, '0'),
            2 => (5.0 / 60.0, 2.5 / 60.0, 24, 'A'),
            _ => (5.0 / 600.0, 2.5 / 600.0, 10, '0'),
        };
        let lon_idx = pair_index(window[0], base, max).ok_or_else(|| fail("character out of range"))?;
        let lat_idx = pair_index(window[1], base, max).ok_or_else(|| fail("character out of range"))?;
        lon += lon_idx as f64 * lon_step;
        lat += lat_idx as f64 * lat_step;
    }

    Ok(HomeLocation {
        latitude: lat,
        longitude: lon,
    })
}

fn pair_index(c: char, base: char, max: u32) -> Option<u32> {
    let idx = (c as u32).checked_sub(base as u32)?;
    (idx < max).then_some(idx)
}
