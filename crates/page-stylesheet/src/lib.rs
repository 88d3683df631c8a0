//! Reference style resolver for `page-styles`.
//!
//! Folds a declaration list into one flattened style: shorthands are
//! expanded per declaration, later declarations override earlier ones, and
//! length values are converted to points against the page context.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod error;
mod expand;
mod units;

pub use error::StylesheetError;
pub use expand::{expand_declaration, is_shorthand};
pub use units::{parse_length, resolve_length, to_points, LengthResolution, Unit};

use page_styles::{Declaration, PageContext, ResolvedStyle, StyleResolver};
use serde_json::{Number, Value};

/// Stylesheet options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StylesheetConfig {
    /// Fail on malformed lengths instead of passing them through.
    pub strict: bool,
    /// Expand shorthand properties into longhands.
    pub expand_shorthands: bool,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            strict: false,
            expand_shorthands: true,
        }
    }
}

/// Merge and unit resolution for one page's nodes.
///
/// Holds no per-call state, so one instance can serve concurrent walks.
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    config: StylesheetConfig,
}

impl Stylesheet {
    /// Create a stylesheet with explicit config.
    pub fn new(config: StylesheetConfig) -> Self {
        Self { config }
    }

    /// Active config.
    pub fn config(&self) -> &StylesheetConfig {
        &self.config
    }

    /// Fold `declarations` in order, later keys winning.
    pub fn flatten(&self, declarations: &[Declaration]) -> ResolvedStyle {
        let mut merged = ResolvedStyle::new();
        for declaration in declarations {
            if self.config.expand_shorthands {
                merged.extend(expand_declaration(declaration));
            } else {
                merged.extend(
                    declaration
                        .iter()
                        .filter(|(_, value)| !value.is_null())
                        .map(|(k, v)| (k.clone(), v.clone())),
                );
            }
        }
        merged
    }

    fn resolve_value(
        &self,
        property: &str,
        value: Value,
        context: &PageContext,
    ) -> Result<Value, StylesheetError> {
        if property == "fontWeight" {
            return Ok(resolve_font_weight(value));
        }
        if !is_length_property(property) {
            return Ok(value);
        }
        match resolve_length(&value, context) {
            LengthResolution::Points(points) => Ok(Number::from_f64(points)
                .map(Value::Number)
                .unwrap_or(value)),
            LengthResolution::Keep => Ok(value),
            LengthResolution::Invalid => {
                let raw = value.as_str().unwrap_or_default().to_string();
                if self.config.strict {
                    return Err(StylesheetError::new(
                        "STYLE_BAD_LENGTH",
                        "length has an unrecognized number or unit",
                    )
                    .with_property(property)
                    .with_value(raw));
                }
                log::warn!("keeping malformed length {}={:?}", property, raw);
                Ok(value)
            }
        }
    }
}

impl StyleResolver for Stylesheet {
    type Error = StylesheetError;

    fn resolve(
        &self,
        context: &PageContext,
        declarations: &[Declaration],
    ) -> Result<ResolvedStyle, Self::Error> {
        let merged = self.flatten(declarations);
        let mut resolved = ResolvedStyle::new();
        for (property, value) in merged {
            let value = self.resolve_value(&property, value, context)?;
            resolved.insert(property, value);
        }
        Ok(resolved)
    }
}

/// Properties whose values are lengths.
pub fn is_length_property(property: &str) -> bool {
    const EXACT: &[&str] = &[
        "width",
        "height",
        "minWidth",
        "minHeight",
        "maxWidth",
        "maxHeight",
        "top",
        "right",
        "bottom",
        "left",
        "fontSize",
        "lineHeight",
        "letterSpacing",
        "textIndent",
        "flexBasis",
        "rowGap",
        "columnGap",
    ];
    if EXACT.contains(&property) {
        return true;
    }
    let side_prefixed = ["margin", "padding"].iter().any(|prefix| {
        property
            .strip_prefix(prefix)
            .is_some_and(|side| matches!(side, "Top" | "Right" | "Bottom" | "Left"))
    });
    side_prefixed
        || (property.starts_with("border")
            && (property.ends_with("Width") || property.ends_with("Radius")))
}

fn resolve_font_weight(value: Value) -> Value {
    let Some(keyword) = value.as_str() else {
        return value;
    };
    let weight = match keyword.trim().to_ascii_lowercase().as_str() {
        "thin" | "hairline" => 100,
        "ultralight" | "extralight" => 200,
        "light" => 300,
        "normal" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "ultrabold" | "extrabold" => 800,
        "heavy" | "black" => 900,
        _ => return value,
    };
    Value::from(weight)
}
