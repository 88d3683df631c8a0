//! Per-page style resolution for paged document trees.
//!
//! Takes a document whose top-level children are pages, derives a
//! [`PageContext`] for each page, and resolves every node's raw declarations
//! into a flattened style through a caller-supplied [`StyleResolver`].
//! The input tree is never mutated; a structurally identical tree is returned.
//!
//! ```
//! use page_styles::{resolve_styles, Declaration, PageContext, ResolvedStyle, SourceDocument, StyleOptions};
//! use serde_json::json;
//!
//! let doc = SourceDocument::from_value(json!({
//!     "children": [{
//!         "type": "PAGE",
//!         "style": { "width": 612, "height": 792 },
//!         "children": [{ "type": "LINK", "style": { "color": "red" } }]
//!     }]
//! }))
//! .unwrap();
//!
//! let merge = |_: &PageContext, decls: &[Declaration]| -> Result<ResolvedStyle, ()> {
//!     Ok(decls.iter().flat_map(|d| d.clone()).collect())
//! };
//! let styled = resolve_styles(&merge, &doc, &StyleOptions::default()).unwrap();
//! let pages = styled.children.unwrap();
//! let link = &pages[0].children.as_ref().unwrap()[0];
//! assert_eq!(link.style["color"], "red");
//! assert_eq!(link.style["textDecoration"], "underline");
//! ```

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

mod context;
mod node;
mod options;
mod resolve;
mod units;

pub use context::{page_context, PageContext};
pub use node::{
    Declaration, Document, DocumentError, Node, NodeKind, Orientation, ResolvedStyle,
    SourceDocument, SourceNode, StyleDeclarations, StyledDocument, StyledNode,
};
pub use options::{KindDefaults, PageDefaults, StyleOptions};
#[cfg(feature = "parallel")]
pub use resolve::resolve_styles_parallel;
pub use resolve::{
    effective_declarations, resolve_node_styles, resolve_page_styles, resolve_styles,
    StyleResolver,
};
pub use units::{absolute_length, parse_length, Unit, POINTS_PER_INCH};
