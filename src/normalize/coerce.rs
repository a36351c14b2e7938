//! Cell coercion helpers.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::SkipReason;

fn float_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.0$").unwrap())
}

/// Collapse a season cell to its canonical token.
///
/// Float-like encodings lose their trailing ".0" ("2025.0" becomes "2025").
/// Empty and "nan" seasons yield `None`.
pub fn coerce_season(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let season = float_suffix().replace(trimmed, "").trim().to_string();
    if season.is_empty() || season.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(season)
    }
}

/// Parse a round cell. Accepts whole numbers written as integers or floats.
pub fn parse_round(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f: f64 = raw.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

/// Parse a score cell.
///
/// Any finite number is accepted, negatives included: a Cartola round can
/// end below zero.
pub fn parse_score(raw: Option<&str>) -> Result<f64, SkipReason> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or(SkipReason::MissingScore)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SkipReason::NonNumericScore),
    }
}

/// Whether a captain cell marks the athlete as captain.
pub fn is_captain(raw: &str) -> bool {
    raw.to_uppercase().contains("CAP")
}
