use super::super::domain::DEFAULT_ECO_SCORE;

pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_barcode(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Clamps a raw score into `[0, 100]`, truncating any fractional part.
pub(crate) fn clamp_eco_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return DEFAULT_ECO_SCORE;
    }
    raw.trunc().clamp(0.0, 100.0) as u8
}

/// Lenient score parsing for catalog exports: `72`, `72.0`, and ` 72 ` all read
/// as 72, anything else falls back to the default score.
pub(crate) fn parse_eco_score(raw: Option<&str>) -> u8 {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .map(clamp_eco_score)
        .unwrap_or(DEFAULT_ECO_SCORE)
}
