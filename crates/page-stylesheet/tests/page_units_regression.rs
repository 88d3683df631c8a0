use page_styles::{resolve_styles, PageDefaults, SourceDocument, StyleOptions, StyledNode};
use page_stylesheet::{Stylesheet, StylesheetConfig};
use serde_json::{json, Value};

fn resolve(doc: Value, options: &StyleOptions) -> Vec<StyledNode> {
    let doc = SourceDocument::from_value(doc).unwrap_or_else(|e| panic!("document: {}", e));
    resolve_styles(&Stylesheet::default(), &doc, options)
        .unwrap_or_else(|e| panic!("resolve: {}", e))
        .children
        .unwrap_or_default()
}

fn number(style: &serde_json::Map<String, Value>, key: &str) -> f64 {
    style
        .get(key)
        .and_then(Value::as_f64)
        .unwrap_or_else(|| panic!("{} should be a number in {:?}", key, style))
}

#[test]
fn each_page_resolves_against_its_own_context() {
    let pages = resolve(
        json!({
            "children": [
                {
                    "type": "PAGE",
                    "props": { "dpi": 144 },
                    "style": { "width": 400, "height": 600, "fontSize": 20 },
                    "children": [{ "type": "VIEW", "style": { "width": "50vw", "height": "10vh", "fontSize": "1rem", "margin": "72px" } }]
                },
                {
                    "type": "PAGE",
                    "box": { "width": 1000, "height": 200 },
                    "style": { "width": 400, "height": 600 },
                    "children": [{ "type": "VIEW", "style": { "width": "50vw", "height": "10vh", "fontSize": "1rem", "margin": "72px" } }]
                }
            ]
        }),
        &StyleOptions::default(),
    );

    let first = &pages[0].children.as_ref().expect("children")[0].style;
    assert_eq!(number(first, "width"), 200.0);
    assert_eq!(number(first, "height"), 60.0);
    assert_eq!(number(first, "fontSize"), 20.0);
    assert_eq!(number(first, "marginTop"), 36.0);

    let second = &pages[1].children.as_ref().expect("children")[0].style;
    assert_eq!(number(second, "width"), 500.0);
    assert_eq!(number(second, "height"), 20.0);
    assert_eq!(number(second, "fontSize"), 18.0);
    assert_eq!(number(second, "marginTop"), 72.0);
}

#[test]
fn page_defaults_feed_unit_resolution() {
    let options = StyleOptions {
        page: PageDefaults {
            dpi: 36.0,
            rem_base: 10.0,
            ..PageDefaults::default()
        },
        ..StyleOptions::default()
    };
    let pages = resolve(
        json!({
            "children": [{
                "type": "PAGE",
                "children": [{ "type": "TEXT", "style": { "fontSize": "1.5rem", "letterSpacing": "2px" } }]
            }]
        }),
        &options,
    );
    let text = &pages[0].children.as_ref().expect("children")[0].style;
    assert_eq!(number(text, "fontSize"), 15.0);
    assert_eq!(number(text, "letterSpacing"), 4.0);
}

#[test]
fn link_fallback_merges_before_shorthand_expansion() {
    let pages = resolve(
        json!({
            "children": [{
                "type": "PAGE",
                "children": [{ "type": "LINK", "style": [{ "padding": "1in" }, { "paddingTop": 0, "color": "green" }] }]
            }]
        }),
        &StyleOptions::default(),
    );
    let link = &pages[0].children.as_ref().expect("children")[0].style;
    assert_eq!(link["color"], json!("green"));
    assert_eq!(link["textDecoration"], json!("underline"));
    assert_eq!(number(link, "paddingTop"), 0.0);
    assert_eq!(number(link, "paddingBottom"), 72.0);
}

#[test]
fn disabling_expansion_keeps_shorthands_verbatim() {
    let doc = SourceDocument::from_value(json!({
        "children": [{ "type": "PAGE", "style": { "margin": "1in 2in" } }]
    }))
    .unwrap_or_else(|e| panic!("document: {}", e));
    let sheet = Stylesheet::new(StylesheetConfig {
        expand_shorthands: false,
        ..StylesheetConfig::default()
    });
    let styled = resolve_styles(&sheet, &doc, &StyleOptions::default())
        .unwrap_or_else(|e| panic!("resolve: {}", e));
    let page = &styled.children.as_ref().expect("pages")[0];
    assert_eq!(page.style["margin"], json!("1in 2in"));
    assert!(page.style.get("marginTop").is_none());
}

#[test]
fn absolute_page_font_size_sets_rem_base() {
    let pages = resolve(
        json!({
            "children": [{
                "type": "PAGE",
                "style": { "fontSize": "12pt", "width": "8.5in" },
                "children": [{ "type": "TEXT", "style": { "fontSize": "2rem", "width": "50vw" } }]
            }]
        }),
        &StyleOptions::default(),
    );
    let page = &pages[0].style;
    assert_eq!(number(page, "fontSize"), 12.0);
    assert_eq!(number(page, "width"), 612.0);
    let text = &pages[0].children.as_ref().expect("children")[0].style;
    assert_eq!(number(text, "fontSize"), 24.0);
    assert_eq!(number(text, "width"), 306.0);
}
