//! Document tree model shared by the style pipeline.
//!
//! A tree is generic over its style payload so the same shape carries raw
//! declarations on the way in ([`SourceNode`]) and flattened styles on the
//! way out ([`StyledNode`]).

use std::fmt;
use std::ops::Deref;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Raw style assignments authored on one node, keyed by property name.
pub type Declaration = Map<String, Value>;

/// Flattened property map produced by a [`StyleResolver`](crate::StyleResolver).
pub type ResolvedStyle = Map<String, Value>;

/// Node carrying raw declarations, as ingested.
pub type SourceNode = Node<StyleDeclarations>;

/// Node carrying a resolved style, as emitted.
pub type StyledNode = Node<ResolvedStyle>;

/// Document root carrying raw declarations.
pub type SourceDocument = Document<StyleDeclarations>;

/// Document root whose pages carry resolved styles.
pub type StyledDocument = Document<ResolvedStyle>;

/// Document primitive kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Page container; direct child of the document root.
    Page,
    /// Generic block container.
    View,
    /// Text block.
    Text,
    /// Raw text leaf inside a text block.
    TextInstance,
    /// Hyperlink.
    Link,
    /// Raster or vector image.
    Image,
    /// Annotation note.
    Note,
    /// Custom-painted canvas.
    Canvas,
    /// Inline SVG root.
    Svg,
    /// Form field.
    Field,
    /// Kind this layer has no special handling for.
    Other(Box<str>),
}

impl NodeKind {
    /// Wire name used in serialized trees.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "PAGE",
            Self::View => "VIEW",
            Self::Text => "TEXT",
            Self::TextInstance => "TEXT_INSTANCE",
            Self::Link => "LINK",
            Self::Image => "IMAGE",
            Self::Note => "NOTE",
            Self::Canvas => "CANVAS",
            Self::Svg => "SVG",
            Self::Field => "FIELD",
            Self::Other(name) => name,
        }
    }

    /// Parse a wire name. Unknown names become [`NodeKind::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "PAGE" => Self::Page,
            "VIEW" => Self::View,
            "TEXT" => Self::Text,
            "TEXT_INSTANCE" => Self::TextInstance,
            "LINK" => Self::Link,
            "IMAGE" => Self::Image,
            "NOTE" => Self::Note,
            "CANVAS" => Self::Canvas,
            "SVG" => Self::Svg,
            "FIELD" => Self::Field,
            other => Self::Other(other.into()),
        }
    }

    /// Whether this node is a hyperlink.
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Page orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Parse a wire name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("portrait") {
            Some(Self::Portrait)
        } else if name.eq_ignore_ascii_case("landscape") {
            Some(Self::Landscape)
        } else {
            None
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered declaration list in merge order (later entries win ties).
///
/// Ingestion accepts a single object, an array of objects, or nothing;
/// all three normalize into this one shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDeclarations {
    entries: SmallVec<[Declaration; 2]>,
}

impl StyleDeclarations {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// List holding one declaration.
    pub fn single(declaration: Declaration) -> Self {
        let mut entries = SmallVec::new();
        entries.push(declaration);
        Self { entries }
    }

    /// Append a declaration at the end of merge order.
    pub fn push(&mut self, declaration: Declaration) {
        self.entries.push(declaration);
    }

    /// Last declared value for `property` in merge order.
    pub fn declared(&self, property: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find_map(|declaration| declaration.get(property))
    }

    /// Iterate declarations in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }
}

impl Deref for StyleDeclarations {
    type Target = [Declaration];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl From<Declaration> for StyleDeclarations {
    fn from(declaration: Declaration) -> Self {
        Self::single(declaration)
    }
}

impl From<Vec<Declaration>> for StyleDeclarations {
    fn from(entries: Vec<Declaration>) -> Self {
        Self {
            entries: SmallVec::from_vec(entries),
        }
    }
}

impl FromIterator<Declaration> for StyleDeclarations {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for StyleDeclarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for declaration in &self.entries {
            seq.serialize_element(declaration)?;
        }
        seq.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStyle {
    One(Declaration),
    Many(Vec<Option<Declaration>>),
}

impl<'de> Deserialize<'de> for StyleDeclarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawStyle>::deserialize(deserializer).map_err(|_| {
            de::Error::custom("style must be an object, an array of objects, or null")
        })?;
        Ok(match raw {
            None => Self::new(),
            Some(RawStyle::One(declaration)) => Self::single(declaration),
            Some(RawStyle::Many(entries)) => entries.into_iter().flatten().collect(),
        })
    }
}

/// One node of the document tree.
///
/// Only `type`, `style` and `children` are typed. Everything else, including
/// `props` and the measured `box`, stays in [`Node::fields`] exactly as
/// ingested and is read on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node<S> {
    /// Primitive kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Raw declarations on input, resolved style on output.
    #[serde(default)]
    pub style: S,
    /// Child nodes. `None` for leaves; `Some(vec![])` is a branch with no children yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node<S>>>,
    /// Every other field, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<S: Default> Node<S> {
    /// Leaf node of `kind` with default style and nothing else set.
    pub fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            style: S::default(),
            children: None,
            fields: Map::new(),
        }
    }

    /// Branch node of `kind` holding `children`.
    pub fn branch(kind: NodeKind, children: Vec<Node<S>>) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(kind)
        }
    }
}

impl<S> Node<S> {
    /// Replace the style payload.
    pub fn with_style(mut self, style: S) -> Self {
        self.style = style;
        self
    }

    /// Set the `props` object.
    pub fn with_props(mut self, props: Map<String, Value>) -> Self {
        self.fields.insert("props".into(), Value::Object(props));
        self
    }

    /// Set the measured `box` object.
    pub fn with_box(mut self, layout_box: Map<String, Value>) -> Self {
        self.fields.insert("box".into(), Value::Object(layout_box));
        self
    }

    /// The `props` field, when it is an object.
    pub fn props(&self) -> Option<&Map<String, Value>> {
        self.fields.get("props").and_then(Value::as_object)
    }

    /// The measured `box` field, when it is an object.
    pub fn layout_box(&self) -> Option<&Map<String, Value>> {
        self.fields.get("box").and_then(Value::as_object)
    }

    /// Copy every field except style and children, which are supplied.
    pub fn rebuild<T>(&self, style: T, children: Option<Vec<Node<T>>>) -> Node<T> {
        Node {
            kind: self.kind.clone(),
            style,
            children,
            fields: self.fields.clone(),
        }
    }

    /// Total nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(Node::subtree_len)
            .sum::<usize>()
    }
}

/// Document root. It has no style of its own; its children are pages.
///
/// An explicit `"children": null` is read as no children field, so it is
/// omitted on output like an absent one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document<S> {
    /// Pages, when any have been built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node<S>>>,
    /// Any other root fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<S> Document<S> {
    /// Root holding `pages`.
    pub fn with_pages(pages: Vec<Node<S>>) -> Self {
        Self {
            children: Some(pages),
            fields: Map::new(),
        }
    }

    /// Number of pages (zero when the root has no children field).
    pub fn page_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }
}

impl SourceDocument {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::from)
    }

    /// Parse a document from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(DocumentError::from)
    }
}

/// Failure to ingest a document tree.
#[derive(Debug)]
pub struct DocumentError {
    /// Stable machine-readable code.
    pub code: &'static str,
    source: serde_json::Error,
}

impl DocumentError {
    /// 1-based line of the failure, when known.
    pub fn line(&self) -> usize {
        self.source.line()
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(source: serde_json::Error) -> Self {
        let code = if source.is_syntax() || source.is_eof() {
            "DOCUMENT_SYNTAX"
        } else if source.is_io() {
            "DOCUMENT_IO"
        } else {
            "DOCUMENT_SHAPE"
        };
        Self { code, source }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.source)
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
