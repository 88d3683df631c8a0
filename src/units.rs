//! Length literals shared by the page context and style resolvers.

use serde_json::Value;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;
const MM_PER_INCH: f64 = 25.4;
const CM_PER_INCH: f64 = 2.54;

/// Unit suffix of a length literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Points, also the meaning of a bare number.
    Pt,
    /// Device pixels at the page dpi.
    Px,
    /// Inches.
    In,
    /// Millimetres.
    Mm,
    /// Centimetres.
    Cm,
    /// Percent of page width.
    Vw,
    /// Percent of page height.
    Vh,
    /// Multiple of the page base font size.
    Rem,
    /// Multiple of the page base font size (no inheritance at this stage).
    Em,
    /// Percent of the containing box; resolved by layout.
    Percent,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "" | "pt" => Self::Pt,
            "px" => Self::Px,
            "in" => Self::In,
            "mm" => Self::Mm,
            "cm" => Self::Cm,
            "vw" => Self::Vw,
            "vh" => Self::Vh,
            "rem" => Self::Rem,
            "em" => Self::Em,
            "%" => Self::Percent,
            _ => return None,
        })
    }

    /// Convert `value` to points when the unit needs nothing but `dpi`.
    pub fn absolute_points(self, value: f64, dpi: f32) -> Option<f64> {
        match self {
            Self::Pt => Some(value),
            Self::Px => Some(value * POINTS_PER_INCH / f64::from(dpi)),
            Self::In => Some(value * POINTS_PER_INCH),
            Self::Mm => Some(value * POINTS_PER_INCH / MM_PER_INCH),
            Self::Cm => Some(value * POINTS_PER_INCH / CM_PER_INCH),
            Self::Vw | Self::Vh | Self::Rem | Self::Em | Self::Percent => None,
        }
    }
}

/// Split a length literal such as `"12.5mm"` into number and unit.
pub fn parse_length(raw: &str) -> Option<(f64, Unit)> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);
    let value = number.parse::<f64>().ok()?;
    let unit = Unit::from_suffix(suffix.trim().to_ascii_lowercase().as_str())?;
    Some((value, unit))
}

/// Absolute length in points from a number or a `pt`/`px`/`in`/`mm`/`cm` string.
pub fn absolute_length(value: &Value, dpi: f32) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => {
            let (number, unit) = parse_length(text)?;
            unit.absolute_points(number, dpi)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_length_splits_number_and_unit() {
        assert_eq!(parse_length("12.5mm"), Some((12.5, Unit::Mm)));
        assert_eq!(parse_length(" -4pt "), Some((-4.0, Unit::Pt)));
        assert_eq!(parse_length("30%"), Some((30.0, Unit::Percent)));
        assert_eq!(parse_length("7"), Some((7.0, Unit::Pt)));
        assert_eq!(parse_length("2REM"), Some((2.0, Unit::Rem)));
        assert_eq!(parse_length("12qq"), None);
        assert_eq!(parse_length("px"), None);
    }

    #[test]
    fn absolute_lengths_need_only_dpi() {
        assert_eq!(absolute_length(&json!(612), 72.0), Some(612.0));
        assert_eq!(absolute_length(&json!("8.5in"), 72.0), Some(612.0));
        assert_eq!(absolute_length(&json!("12pt"), 72.0), Some(12.0));
        assert_eq!(absolute_length(&json!("96px"), 96.0), Some(72.0));
        assert!((absolute_length(&json!("210mm"), 72.0).unwrap_or_default() - 595.2756).abs() < 1e-3);
        assert_eq!(absolute_length(&json!("50vw"), 72.0), None);
        assert_eq!(absolute_length(&json!("2rem"), 72.0), None);
        assert_eq!(absolute_length(&json!("auto"), 72.0), None);
        assert_eq!(absolute_length(&json!(true), 72.0), None);
    }
}
