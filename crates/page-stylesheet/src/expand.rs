//! Shorthand expansion into longhand properties.

use page_styles::Declaration;
use serde_json::Value;

use crate::units::is_length_token;

const SIDES: [&str; 4] = ["Top", "Right", "Bottom", "Left"];
const CORNERS: [&str; 4] = ["TopLeft", "TopRight", "BottomRight", "BottomLeft"];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "none", "hidden"];

/// Expand every shorthand in `declaration`.
///
/// Longhands written in the same declaration beat the shorthand they
/// overlap, regardless of key order.
pub fn expand_declaration(declaration: &Declaration) -> Declaration {
    let mut out = Declaration::new();
    for (property, value) in declaration {
        if !value.is_null() {
            expand_shorthand(property, value, &mut out);
        }
    }
    for (property, value) in declaration {
        if value.is_null() || is_shorthand(property) {
            continue;
        }
        out.insert(property.clone(), value.clone());
    }
    out
}

/// Whether `property` is a shorthand this module expands.
pub fn is_shorthand(property: &str) -> bool {
    matches!(
        property,
        "margin"
            | "padding"
            | "marginHorizontal"
            | "marginVertical"
            | "paddingHorizontal"
            | "paddingVertical"
            | "borderWidth"
            | "borderColor"
            | "borderStyle"
            | "borderRadius"
            | "border"
            | "borderTop"
            | "borderRight"
            | "borderBottom"
            | "borderLeft"
            | "flex"
            | "gap"
    )
}

fn expand_shorthand(property: &str, value: &Value, out: &mut Declaration) {
    match property {
        "margin" | "padding" => {
            let values = box_values(value);
            for (side, v) in SIDES.iter().zip(values) {
                out.insert(format!("{property}{side}"), v);
            }
        }
        "marginHorizontal" | "paddingHorizontal" => {
            let base = property.trim_end_matches("Horizontal");
            out.insert(format!("{base}Left"), value.clone());
            out.insert(format!("{base}Right"), value.clone());
        }
        "marginVertical" | "paddingVertical" => {
            let base = property.trim_end_matches("Vertical");
            out.insert(format!("{base}Top"), value.clone());
            out.insert(format!("{base}Bottom"), value.clone());
        }
        "borderWidth" | "borderColor" | "borderStyle" => {
            let suffix = property.trim_start_matches("border");
            for (side, v) in SIDES.iter().zip(box_values(value)) {
                out.insert(format!("border{side}{suffix}"), v);
            }
        }
        "borderRadius" => {
            for (corner, v) in CORNERS.iter().zip(box_values(value)) {
                out.insert(format!("border{corner}Radius"), v);
            }
        }
        "border" => {
            for side in SIDES {
                expand_border_side(side, value, out);
            }
        }
        "borderTop" | "borderRight" | "borderBottom" | "borderLeft" => {
            expand_border_side(property.trim_start_matches("border"), value, out);
        }
        "flex" => expand_flex(value, out),
        "gap" => {
            let values: Vec<Value> = match value {
                Value::String(text) => tokens(text).into_iter().map(token_value).collect(),
                other => vec![other.clone()],
            };
            let row = values.first().cloned().unwrap_or(Value::Null);
            let column = values.get(1).cloned().unwrap_or_else(|| row.clone());
            out.insert("rowGap".into(), row);
            out.insert("columnGap".into(), column);
        }
        _ => {}
    }
}

/// CSS 1-4 value box order: top, right, bottom, left.
fn box_values(value: &Value) -> [Value; 4] {
    let parts: Vec<Value> = match value {
        Value::String(text) => tokens(text).into_iter().map(token_value).collect(),
        other => vec![other.clone()],
    };
    match parts.as_slice() {
        [all] => [all.clone(), all.clone(), all.clone(), all.clone()],
        [vertical, horizontal] => [
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ],
        [top, horizontal, bottom] => [
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ],
        [top, right, bottom, left, ..] => {
            [top.clone(), right.clone(), bottom.clone(), left.clone()]
        }
        [] => [Value::Null, Value::Null, Value::Null, Value::Null],
    }
}

fn expand_border_side(side: &str, value: &Value, out: &mut Declaration) {
    let text = match value {
        Value::String(text) => text,
        other => {
            out.insert(format!("border{side}Width"), other.clone());
            return;
        }
    };
    for token in tokens(text) {
        if BORDER_STYLES.contains(&token) {
            out.insert(format!("border{side}Style"), Value::from(token));
        } else if is_length_token(token) {
            out.insert(format!("border{side}Width"), token_value(token));
        } else {
            out.insert(format!("border{side}Color"), Value::from(token));
        }
    }
}

fn expand_flex(value: &Value, out: &mut Declaration) {
    let parts: Vec<Value> = match value {
        Value::String(text) => tokens(text).into_iter().map(token_value).collect(),
        other => vec![other.clone()],
    };
    let (grow, shrink, basis) = match parts.as_slice() {
        [grow] if grow.is_number() => (grow.clone(), Value::from(1), Value::from(0)),
        [basis] => (Value::from(0), Value::from(1), basis.clone()),
        [grow, shrink] => (grow.clone(), shrink.clone(), Value::from(0)),
        [grow, shrink, basis, ..] => (grow.clone(), shrink.clone(), basis.clone()),
        [] => return,
    };
    out.insert("flexGrow".into(), grow);
    out.insert("flexShrink".into(), shrink);
    out.insert("flexBasis".into(), basis);
}

/// Whitespace split that keeps parenthesised groups such as `rgb(1, 2, 3)` whole.
fn tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    out.push(&text[s..idx]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        out.push(&text[s..]);
    }
    out
}

/// Bare numeric tokens become numbers; everything else stays a string.
fn token_value(token: &str) -> Value {
    match token.parse::<f64>() {
        Ok(n) => serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(token)),
        Err(_) => Value::from(token),
    }
}
