use clap::{Parser, ValueEnum};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.pota.app";

/// Ten years; anything longer is a typo.
const MAX_CACHE_TTL_HOURS: u64 = 24 * 365 * 10;

/// Options historically spelled with a single dash (`-lat 51.5`).
const LEGACY_LONG_OPTIONS: &[&str] = &["lat", "lon", "grid", "unit"];

#[derive(Parser, Debug)]
#[command(
    name = "pota-progress",
    version,
    about = "Shows which of your nearest POTA parks you have already activated"
)]
pub struct Cli {
    #[arg(
        short = 'n',
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Number of parks to display"
    )]
    pub count: u32,
    #[arg(short = 'c', value_parser = parse_callsign, help = "Callsign to display")]
    pub callsign: String,
    #[arg(long, allow_hyphen_values = true, help = "Latitude of location")]
    pub lat: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Longitude of location")]
    pub lon: Option<String>,
    #[arg(long, help = "Maidenhead grid square of location (used when lat/lon are absent)")]
    pub grid: Option<String>,
    #[arg(
        long,
        value_enum,
        ignore_case = true,
        default_value_t = Unit::Km,
        help = "Distance unit"
    )]
    pub unit: Unit,
    #[arg(long, default_value = DEFAULT_API_BASE, help = "POTA API root URL")]
    pub api_base: String,
    #[arg(long, help = "Response cache directory (default: $HOME/.cache/pota-progress)")]
    pub cache_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Bypass the response cache")]
    pub no_cache: bool,
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(u64).range(..=MAX_CACHE_TTL_HOURS),
        help = "Hours a cached response stays fresh"
    )]
    pub cache_ttl_hours: u64,
    #[arg(long, default_value_t = 20, help = "Per-request timeout in seconds")]
    pub timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Unit {
    Km,
    Mi,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Km => write!(f, "km"),
            Unit::Mi => write!(f, "mi"),
        }
    }
}

fn parse_callsign(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("callsign must not be empty".to_string());
    }
    Ok(raw.to_string())
}

/// Rewrites `-lat`, `-lon`, `-grid` and `-unit` (and their `=value` forms)
/// to the double-dash spelling clap understands.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            legacy_rewrite(&arg).unwrap_or(arg)
        })
        .collect()
}

fn legacy_rewrite(arg: &OsStr) -> Option<OsString> {
    let s = arg.to_str()?;
    let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
    let name = rest.split('=').next().unwrap_or(rest);
    LEGACY_LONG_OPTIONS
        .contains(&name)
        .then(|| OsString::from(format!("-{}", s)))
}
