//! Length parsing and conversion to points.

pub use page_styles::{parse_length, Unit};
use page_styles::PageContext;
use serde_json::Value;

/// Outcome of resolving one length value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthResolution {
    /// Converted to points.
    Points(f64),
    /// Left as authored: numbers, keywords, percentages, or lengths whose
    /// reference dimension is unknown.
    Keep,
    /// Looked like a length but could not be parsed.
    Invalid,
}

/// Convert `value` in `unit` to points, or `None` when it must stay as authored.
pub fn to_points(value: f64, unit: Unit, context: &PageContext) -> Option<f64> {
    let points = match unit {
        Unit::Vw => value * f64::from(context.width?) / 100.0,
        Unit::Vh => value * f64::from(context.height?) / 100.0,
        Unit::Rem | Unit::Em => value * f64::from(context.rem_base),
        Unit::Percent => return None,
        absolute => absolute.absolute_points(value, context.dpi)?,
    };
    Some(points)
}

/// Resolve a raw length value against `context`.
pub fn resolve_length(raw: &Value, context: &PageContext) -> LengthResolution {
    let Value::String(text) = raw else {
        return LengthResolution::Keep;
    };
    let trimmed = text.trim();
    let looks_numeric = trimmed
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !looks_numeric {
        return LengthResolution::Keep;
    }
    let Some((value, unit)) = parse_length(trimmed) else {
        return LengthResolution::Invalid;
    };
    match to_points(value, unit, context) {
        Some(points) => LengthResolution::Points(points),
        None => {
            if matches!(unit, Unit::Vw | Unit::Vh) {
                log::debug!("{:?} length {:?} kept: page dimension unresolved", unit, text);
            }
            LengthResolution::Keep
        }
    }
}

/// Whether a `"<number><unit>"` token parses as a length.
pub fn is_length_token(token: &str) -> bool {
    parse_length(token).is_some()
}
