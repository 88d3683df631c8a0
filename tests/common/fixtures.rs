use page_styles::{Node, NodeKind, SourceDocument, SourceNode, StyleDeclarations};
use serde_json::{json, Value};

pub const INVOICE_JSON: &str = include_str!("../fixtures/invoice.json");

pub fn invoice() -> SourceDocument {
    SourceDocument::from_json(INVOICE_JSON).unwrap_or_else(|e| panic!("invoice fixture: {}", e))
}

pub fn declarations(value: Value) -> StyleDeclarations {
    serde_json::from_value(value).unwrap_or_else(|e| panic!("declarations: {}", e))
}

/// Pages of nested views, every third leaf a link.
pub fn synthetic_document(pages: usize, fanout: usize, depth: usize) -> SourceDocument {
    let pages = (0..pages)
        .map(|page| {
            let style = declarations(json!({ "width": 400 + page, "height": 600, "fontSize": 10 }));
            Node::branch(NodeKind::Page, subtree(fanout, depth, page)).with_style(style)
        })
        .collect();
    SourceDocument::with_pages(pages)
}

fn subtree(fanout: usize, depth: usize, seed: usize) -> Vec<SourceNode> {
    (0..fanout)
        .map(|i| {
            let id = seed * 31 + i;
            if depth == 0 {
                let kind = if id % 3 == 0 { NodeKind::Link } else { NodeKind::Text };
                Node::leaf(kind).with_style(declarations(json!({ "fontSize": "1.2rem", "id": id })))
            } else {
                Node::branch(NodeKind::View, subtree(fanout, depth - 1, id))
                    .with_style(declarations(json!([{ "padding": "2mm" }, { "id": id }])))
            }
        })
        .collect()
}
