//! Style resolution over a document tree.
//!
//! The walk derives one [`PageContext`] per page and hands it, unchanged, to
//! every node underneath. Each node's declarations are prefixed with its
//! kind defaults and passed to a [`StyleResolver`]. Output is a fresh tree;
//! the input is only borrowed.

use std::borrow::Cow;

use crate::context::{page_context, PageContext};
use crate::node::{
    Declaration, ResolvedStyle, SourceDocument, SourceNode, StyledDocument, StyledNode,
};
use crate::options::{KindDefaults, StyleOptions};

/// Merges declarations into a flattened style.
///
/// `declarations` is in merge order: on conflicting keys later entries
/// override earlier ones. An empty slice means no styling. Errors are
/// returned to the caller of the walk untouched.
pub trait StyleResolver {
    /// Failure raised while resolving one node.
    type Error;

    /// Resolve `declarations` against `context`.
    fn resolve(
        &self,
        context: &PageContext,
        declarations: &[Declaration],
    ) -> Result<ResolvedStyle, Self::Error>;
}

impl<F, E> StyleResolver for F
where
    F: Fn(&PageContext, &[Declaration]) -> Result<ResolvedStyle, E>,
{
    type Error = E;

    fn resolve(
        &self,
        context: &PageContext,
        declarations: &[Declaration],
    ) -> Result<ResolvedStyle, Self::Error> {
        self(context, declarations)
    }
}

/// Declarations handed to the resolver for `node`: kind defaults first, then
/// the node's own style.
///
/// Nodes without defaults borrow their style as-is.
pub fn effective_declarations<'a>(
    node: &'a SourceNode,
    defaults: &KindDefaults,
) -> Cow<'a, [Declaration]> {
    match defaults.get(&node.kind) {
        None => Cow::Borrowed(&*node.style),
        Some(fallback) => {
            let mut merged = Vec::with_capacity(node.style.len() + 1);
            merged.push(fallback.clone());
            merged.extend(node.style.iter().cloned());
            Cow::Owned(merged)
        }
    }
}

/// Resolve `node` and its subtree against a fixed page `context`.
///
/// Pre-order: a node's style is resolved before its children. A node with no
/// children field yields one without; an empty children list stays empty.
pub fn resolve_node_styles<R>(
    resolver: &R,
    context: &PageContext,
    node: &SourceNode,
    defaults: &KindDefaults,
) -> Result<StyledNode, R::Error>
where
    R: StyleResolver + ?Sized,
{
    let style = resolver.resolve(context, &effective_declarations(node, defaults))?;

    let children = match &node.children {
        None => None,
        Some(children) => Some(
            children
                .iter()
                .map(|child| resolve_node_styles(resolver, context, child, defaults))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    Ok(node.rebuild(style, children))
}

/// Build the context for `page` and resolve its whole subtree with it.
pub fn resolve_page_styles<R>(
    resolver: &R,
    page: &SourceNode,
    options: &StyleOptions,
) -> Result<StyledNode, R::Error>
where
    R: StyleResolver + ?Sized,
{
    let context = page_context(page, &options.page);
    resolve_node_styles(resolver, &context, page, &options.kind_defaults)
}

/// Resolve every page of `root`.
///
/// A root without a children field comes back as-is; the root itself never
/// receives a style.
pub fn resolve_styles<R>(
    resolver: &R,
    root: &SourceDocument,
    options: &StyleOptions,
) -> Result<StyledDocument, R::Error>
where
    R: StyleResolver + ?Sized,
{
    let Some(pages) = &root.children else {
        return Ok(StyledDocument {
            children: None,
            fields: root.fields.clone(),
        });
    };

    let mut resolved = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        log::trace!("resolving styles for page {} ({} nodes)", index, page.subtree_len());
        resolved.push(resolve_page_styles(resolver, page, options)?);
    }

    Ok(StyledDocument {
        children: Some(resolved),
        fields: root.fields.clone(),
    })
}

/// Parallel variant of [`resolve_styles`]; pages are resolved on the rayon pool.
///
/// Output equals the sequential walk. If several pages fail, the error from
/// the lowest page index is returned.
#[cfg(feature = "parallel")]
pub fn resolve_styles_parallel<R>(
    resolver: &R,
    root: &SourceDocument,
    options: &StyleOptions,
) -> Result<StyledDocument, R::Error>
where
    R: StyleResolver + Sync + ?Sized,
    R::Error: Send,
{
    use rayon::prelude::*;

    let Some(pages) = &root.children else {
        return resolve_styles(resolver, root, options);
    };
    if pages.len() < 2 || rayon::current_num_threads() < 2 {
        return resolve_styles(resolver, root, options);
    }

    let results: Vec<Result<StyledNode, R::Error>> = pages
        .par_iter()
        .map(|page| resolve_page_styles(resolver, page, options))
        .collect();
    let resolved = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    Ok(StyledDocument {
        children: Some(resolved),
        fields: root.fields.clone(),
    })
}
