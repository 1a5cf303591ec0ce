//! Scanning engine: source cursor, boundaries, markers and sentence assembly.

pub mod abbreviation;
pub mod assembler;
pub mod boundary;
pub mod config;
pub mod enclosure;
pub mod marker;
pub mod node;
pub mod source;
pub mod state;

pub use abbreviation::{AbbreviationKind, AbbreviationMarker};
pub use assembler::{assemble_node, assemble_text, SentenceAssembler, SentenceBuilder};
pub use boundary::{Boundary, Rules, SeparatorSet, DEFAULT_SEPARATORS};
pub use config::{
    list_presets, AbbreviationConfig, PairConfig, SeparatorConfig, SplitterConfig,
};
pub use enclosure::{default_pair_marks, PairMark, PairMarker};
pub use marker::Marker;
pub use node::{
    sentences, syntax, ForeignKind, Leaf, LineColumn, Location, Node, NodeKind, PairMarkContext,
    Position, Sentence, Span, SplitParent, TxtNode,
};
pub use source::{validate_tree, SourceCursor};
pub use state::{ActivePair, ScanState};
