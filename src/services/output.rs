use crate::cli::Unit;
use crate::domain::models::{HomeLocation, RankedPark};
use crate::services::geo::format_coordinate;

pub const NAME_LIMIT: usize = 43;
const ELLIPSIS: &str = "..";
const ACTIVATED: &str = "\x1b[32mActivated\x1b[0m";
const PENDING: &str = "\x1b[31m Pending \x1b[0m";

pub const TABLE_HEADER: &str = "  Status  | Distance | Reference | Name";
pub const TABLE_RULE: &str =
    "----------|----------|-----------|----------------------------------------------";

pub fn status_label(activated: bool) -> &'static str {
    if activated {
        ACTIVATED
    } else {
        PENDING
    }
}

pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_LIMIT {
        let mut short: String = name.chars().take(NAME_LIMIT).collect();
        short.push_str(ELLIPSIS);
        short
    } else {
        name.to_string()
    }
}

/// Centres `s` in `width` cells; when the padding is odd and the width is odd
/// the extra space goes on the left.
pub fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

pub fn format_distance(distance: f64, unit: Unit) -> String {
    format!("{:>8}", format!("{:.1} {}", distance, unit))
}

pub fn summary_line(shown: usize, callsign: &str, home: &HomeLocation) -> String {
    format!(
        "The closest {} parks to {} QTH at {}, {} are:",
        shown,
        callsign,
        format_coordinate(home.latitude),
        format_coordinate(home.longitude)
    )
}

pub fn table_row(park: &RankedPark, unit: Unit) -> String {
    format!(
        "{} | {} | {} | {}",
        status_label(park.activated),
        format_distance(park.distance_from_home, unit),
        center(park.reference(), 9),
        truncate_name(&park.park.name)
    )
}

pub fn render_report(
    home: &HomeLocation,
    callsign: &str,
    unit: Unit,
    parks: &[RankedPark],
) -> String {
    let mut out = Vec::with_capacity(parks.len() + 3);
    out.push(summary_line(parks.len(), callsign, home));
    out.push(TABLE_HEADER.to_string());
    out.push(TABLE_RULE.to_string());
    out.extend(parks.iter().map(|p| table_row(p, unit)));
    let mut text = out.join("\n");
    text.push('\n');
    text
}
