//! Per-page rendering context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{Orientation, SourceNode};
use crate::options::PageDefaults;
use crate::units::absolute_length;

/// Environment for resolving relative units on one page.
///
/// Built once per page and shared read-only by every node under it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Page width in points, when known.
    pub width: Option<f32>,
    /// Page height in points, when known.
    pub height: Option<f32>,
    /// Page orientation.
    pub orientation: Orientation,
    /// Device resolution.
    pub dpi: f32,
    /// Base font size for `rem` units.
    pub rem_base: f32,
}

impl PageContext {
    /// Context with no dimensions and the given fallbacks.
    pub fn from_defaults(defaults: &PageDefaults) -> Self {
        Self {
            width: None,
            height: None,
            orientation: defaults.orientation,
            dpi: defaults.dpi,
            rem_base: defaults.rem_base,
        }
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::from_defaults(&PageDefaults::default())
    }
}

/// Derive the context for `page`.
///
/// Dimensions prefer the measured box over declared style; everything else
/// prefers the page's own value over `defaults`. Declared dimensions and
/// `fontSize` may be numbers or absolute lengths (`pt`, `px`, `in`, `mm`,
/// `cm`). A value that cannot be interpreted counts as absent, and a
/// dimension found nowhere is left `None`.
pub fn page_context(page: &SourceNode, defaults: &PageDefaults) -> PageContext {
    let props = page.props();
    let dpi = props
        .and_then(|props| props.get("dpi"))
        .and_then(positive_number)
        .unwrap_or(defaults.dpi);
    let orientation = props
        .and_then(|props| props.get("orientation"))
        .and_then(Value::as_str)
        .and_then(Orientation::from_name)
        .unwrap_or(defaults.orientation);

    let width = measured(page, "width").or_else(|| declared_length(page, "width", dpi));
    let height = measured(page, "height").or_else(|| declared_length(page, "height", dpi));
    if width.is_none() || height.is_none() {
        log::debug!(
            "page dimensions unresolved (width={:?} height={:?}); deferring to layout",
            width,
            height
        );
    }

    PageContext {
        width,
        height,
        orientation,
        dpi,
        rem_base: declared_length(page, "fontSize", dpi).unwrap_or(defaults.rem_base),
    }
}

fn positive_number(value: &Value) -> Option<f32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number > 0.0).then_some(number as f32)
}

fn measured(page: &SourceNode, dimension: &str) -> Option<f32> {
    page.layout_box()?
        .get(dimension)?
        .as_f64()
        .map(|v| v as f32)
}

fn declared_length(page: &SourceNode, property: &str, dpi: f32) -> Option<f32> {
    let value = page.style.declared(property)?;
    let points = absolute_length(value, dpi);
    if points.is_none() {
        log::debug!("page {} {} is not an absolute length; ignored", property, value);
    }
    points.map(|v| v as f32)
}
