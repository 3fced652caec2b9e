//! Parsing of the geometry engine's text report.

/// Marker immediately preceding the hull volume in a report.
pub const VOLUME_MARKER: &str = "volume:";

const TOTAL_VOLUME_LABEL: &str = "Total volume:";

/// The number following the first [`VOLUME_MARKER`] in `report`.
///
/// The search is case-sensitive. Returns `None` if the marker is absent or
/// not followed by a number.
pub fn parse_volume(report: &str) -> Option<f64> {
    let idx = report.find(VOLUME_MARKER)?;
    report[idx + VOLUME_MARKER.len()..]
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// The `Total volume:` line of a qconvex report, trimmed.
pub fn total_volume_line(report: &str) -> Option<&str> {
    report
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(TOTAL_VOLUME_LABEL))
}
