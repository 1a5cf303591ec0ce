//! Node types emitted by the splitter and the foreign TxtAST node it consumes.
//!
//! Serialized shapes follow the textlint TxtAST convention so that the output
//! can be handed to tools that already understand it: `range` is a
//! `[start, end)` pair of byte offsets and `loc` holds 1-based lines with
//! 0-based columns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Node type names used on the wire.
pub mod syntax {
    /// Run of spaces or line breaks.
    pub const WHITE_SPACE: &str = "WhiteSpace";
    /// Separator run that closed a sentence.
    pub const PUNCTUATION: &str = "Punctuation";
    /// Sentence parent node.
    pub const SENTENCE: &str = "Sentence";
    /// Plain text run. Also the TxtAST type of text-bearing foreign nodes.
    pub const STR: &str = "Str";
    /// TxtAST hard line break.
    pub const BREAK: &str = "Break";
}

/// Absolute position inside the original document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 0-based column, counted in characters
    pub column: usize,
    /// UTF-8 byte offset from the start of the document
    pub offset: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Drop the offset, keeping the `loc` part
    pub fn line_column(&self) -> LineColumn {
        LineColumn::new(self.line, self.column)
    }
}

/// Line/column pair as stored in a node's `loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl LineColumn {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Start and end line/column of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub start: LineColumn,
    pub end: LineColumn,
}

impl Location {
    pub fn new(start: LineColumn, end: LineColumn) -> Self {
        Self { start, end }
    }

    /// Location spanning two cursor positions
    pub fn between(start: &Position, end: &Position) -> Self {
        Self::new(start.line_column(), end.line_column())
    }
}

/// Half-open byte range `[start, end)`, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes (zero for inverted spans)
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `offset` lies inside the span
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `other` lies entirely inside this span
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<[usize; 2]> for Span {
    fn from([start, end]: [usize; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<Span> for [usize; 2] {
    fn from(span: Span) -> Self {
        [span.start, span.end]
    }
}

/// Leaf payload shared by `WhiteSpace`, `Punctuation` and `Str`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub value: String,
    pub raw: String,
    pub range: Span,
    pub loc: Location,
}

impl Leaf {
    /// Build a leaf covering `text` between two cursor positions
    pub fn new(text: &str, start: &Position, end: &Position) -> Self {
        Self {
            value: text.to_string(),
            raw: text.to_string(),
            range: Span::new(start.offset, end.offset),
            loc: Location::between(start, end),
        }
    }
}

/// A paired-delimiter span resolved while scanning a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairMarkContext {
    /// Name of the pair, e.g. `"double quote"`
    pub kind: String,
    /// Opening mark through closing mark, inclusive
    pub range: Span,
}

/// A finalized sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    pub raw: String,
    pub range: Span,
    pub loc: Location,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub contexts: SmallVec<[PairMarkContext; 2]>,
}

impl Sentence {
    /// Text of the sentence without surrounding whitespace children
    pub fn text(&self) -> &str {
        self.raw.trim()
    }
}

/// Discriminant of [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    WhiteSpace,
    Punctuation,
    Str,
    Sentence,
    Foreign,
}

/// Output node of the splitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    WhiteSpace(Leaf),
    Punctuation(Leaf),
    Str(Leaf),
    Sentence(Sentence),
    /// A TxtAST node passed through unchanged
    #[serde(untagged)]
    Foreign(TxtNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::WhiteSpace(_) => NodeKind::WhiteSpace,
            Node::Punctuation(_) => NodeKind::Punctuation,
            Node::Str(_) => NodeKind::Str,
            Node::Sentence(_) => NodeKind::Sentence,
            Node::Foreign(_) => NodeKind::Foreign,
        }
    }

    /// The `type` string this node serializes with
    pub fn type_name(&self) -> &str {
        match self {
            Node::WhiteSpace(_) => syntax::WHITE_SPACE,
            Node::Punctuation(_) => syntax::PUNCTUATION,
            Node::Str(_) => syntax::STR,
            Node::Sentence(_) => syntax::SENTENCE,
            Node::Foreign(node) => &node.node_type,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Node::WhiteSpace(leaf) | Node::Punctuation(leaf) | Node::Str(leaf) => &leaf.raw,
            Node::Sentence(sentence) => &sentence.raw,
            Node::Foreign(node) => &node.raw,
        }
    }

    pub fn range(&self) -> Span {
        match self {
            Node::WhiteSpace(leaf) | Node::Punctuation(leaf) | Node::Str(leaf) => leaf.range,
            Node::Sentence(sentence) => sentence.range,
            Node::Foreign(node) => node.range,
        }
    }

    pub fn loc(&self) -> Location {
        match self {
            Node::WhiteSpace(leaf) | Node::Punctuation(leaf) | Node::Str(leaf) => leaf.loc,
            Node::Sentence(sentence) => sentence.loc,
            Node::Foreign(node) => node.loc,
        }
    }

    pub fn as_sentence(&self) -> Option<&Sentence> {
        match self {
            Node::Sentence(sentence) => Some(sentence),
            _ => None,
        }
    }

    /// Children of a sentence; empty for every other node
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Sentence(sentence) => &sentence.children,
            _ => &[],
        }
    }
}

/// Iterate over the sentences of a split result.
pub fn sentences(nodes: &[Node]) -> impl Iterator<Item = &Sentence> {
    nodes.iter().filter_map(Node::as_sentence)
}

/// How the splitter treats a foreign node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKind {
    /// Plain text the splitter re-segments
    Text,
    /// Hard line break, handled like whitespace
    LineBreak,
    /// Anything else, passed through unsplit
    Other,
}

/// A node of a TxtAST document.
///
/// Fields the splitter does not interpret are kept in `extra` and written
/// back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxtNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub raw: String,
    pub range: Span,
    pub loc: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TxtNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TxtNode {
    /// Leaf node without a value
    pub fn new(
        node_type: impl Into<String>,
        raw: impl Into<String>,
        range: Span,
        loc: Location,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            raw: raw.into(),
            range,
            loc,
            value: None,
            children: None,
            extra: Map::new(),
        }
    }

    /// `Str` node whose value equals its raw text
    pub fn text(raw: impl Into<String>, range: Span, loc: Location) -> Self {
        let raw = raw.into();
        let mut node = Self::new(syntax::STR, raw.clone(), range, loc);
        node.value = Some(raw);
        node
    }

    /// Parent node
    pub fn parent(
        node_type: impl Into<String>,
        raw: impl Into<String>,
        range: Span,
        loc: Location,
        children: Vec<TxtNode>,
    ) -> Self {
        let mut node = Self::new(node_type, raw, range, loc);
        node.children = Some(children);
        node
    }

    pub fn children(&self) -> &[TxtNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn kind(&self) -> ForeignKind {
        match self.node_type.as_str() {
            syntax::STR => ForeignKind::Text,
            syntax::BREAK => ForeignKind::LineBreak,
            _ => ForeignKind::Other,
        }
    }
}

/// A parent node whose children were re-segmented into sentences.
///
/// Every field except `children` is copied from the input node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitParent {
    #[serde(rename = "type")]
    pub node_type: String,
    pub raw: String,
    pub range: Span,
    pub loc: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SplitParent {
    pub(crate) fn from_parent(parent: &TxtNode, children: Vec<Node>) -> Self {
        Self {
            node_type: parent.node_type.clone(),
            raw: parent.raw.clone(),
            range: parent.range,
            loc: parent.loc,
            value: parent.value.clone(),
            children,
            extra: parent.extra.clone(),
        }
    }
}
