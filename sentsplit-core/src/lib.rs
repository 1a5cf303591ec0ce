//! Position-preserving sentence splitter
//!
//! This crate splits natural-language text into sentence and whitespace nodes
//! while keeping the exact source position (line, column and byte offset) of
//! every node. It accepts either a plain string or a text-bearing node of a
//! textlint-style document AST, so that linting tools can report problems
//! against sentence-accurate spans.
//!
//! # Architecture
//!
//! - **Domain layer**: the scanning engine. A source cursor feeds boundary
//!   predicates (new line, space, separator, any value); context markers
//!   (paired delimiters, abbreviations) keep separators from firing where they
//!   should not; an assembler groups the runs into sentences.
//! - **API layer**: the [`Splitter`] facade, configuration and errors.
//!
//! # Example
//!
//! ```rust
//! use sentsplit_core::{split, Node};
//!
//! let nodes = split("Hello World. My name is Jonas.");
//! let raws: Vec<&str> = nodes.iter().map(Node::raw).collect();
//! assert_eq!(raws, vec!["Hello World.", " ", "My name is Jonas."]);
//!
//! // every node keeps its absolute range
//! assert_eq!(nodes[2].range().start, 13);
//! ```

pub mod api;
pub mod domain;

pub use api::{split, split_ast, ConfigBuilder, Result, SplitError, Splitter};
pub use domain::config::{
    list_presets, AbbreviationConfig, PairConfig, SeparatorConfig, SplitterConfig,
};
pub use domain::node::{
    sentences, syntax, ForeignKind, Leaf, LineColumn, Location, Node, NodeKind, PairMarkContext,
    Position, Sentence, Span, SplitParent, TxtNode,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruction() {
        let text = "Hello! 「こんにちは。」と言った。\n\n Bye.";
        let rebuilt: String = split(text).iter().map(Node::raw).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_public_exports() {
        let config = SplitterConfig::builder().build().unwrap();
        let splitter = Splitter::new(config).unwrap();
        assert_eq!(splitter.split("a").len(), 1);
        assert!(list_presets().contains(&"en"));
    }
}
