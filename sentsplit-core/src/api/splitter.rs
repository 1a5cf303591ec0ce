//! Splitter facade owning validated rules

use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use crate::api::Result;
use crate::domain::assembler::{assemble_node, assemble_text};
use crate::domain::boundary::Rules;
use crate::domain::config::SplitterConfig;
use crate::domain::node::{Node, SplitParent, TxtNode};

/// Sentence splitter.
///
/// Immutable after construction and safe to share between threads.
///
/// # Example
///
/// ```rust
/// use sentsplit_core::{Splitter, SplitterConfig};
///
/// let config = SplitterConfig::builder().preset("en").build().unwrap();
/// let splitter = Splitter::new(config).unwrap();
///
/// let nodes = splitter.split("I can see Mt. Fuji from here. It is tall.");
/// let sentences: Vec<&str> = sentsplit_core::sentences(&nodes).map(|s| s.text()).collect();
/// assert_eq!(sentences, vec!["I can see Mt. Fuji from here.", "It is tall."]);
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    rules: Rules,
}

impl Splitter {
    /// Validate `config` and build a splitter from it
    pub fn new(config: SplitterConfig) -> Result<Self> {
        Ok(Self {
            rules: config.compile()?,
        })
    }

    /// Splitter for a built-in preset
    pub fn with_preset(name: &str) -> Result<Self> {
        Self::new(SplitterConfig::preset(name)?)
    }

    /// Splitter for a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(SplitterConfig::from_file(path)?)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Split `text` into sentence and whitespace nodes
    pub fn split(&self, text: &str) -> Vec<Node> {
        let nodes = assemble_text(&self.rules, text);
        debug!("split {} bytes into {} nodes", text.len(), nodes.len());
        nodes
    }

    /// Re-segment the children of a TxtAST parent node into sentences
    pub fn split_ast(&self, node: &TxtNode) -> Result<SplitParent> {
        let children = assemble_node(&self.rules, node)?;
        debug!(
            "split {} node {}..{} into {} nodes",
            node.node_type,
            node.range.start,
            node.range.end,
            children.len()
        );
        Ok(SplitParent::from_parent(node, children))
    }

    /// Split independent texts, in parallel when the `parallel` feature is on
    #[cfg(feature = "parallel")]
    pub fn split_batch<S>(&self, texts: &[S]) -> Vec<Vec<Node>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        texts
            .par_iter()
            .map(|text| self.split(text.as_ref()))
            .collect()
    }

    /// Split independent texts, in parallel when the `parallel` feature is on
    #[cfg(not(feature = "parallel"))]
    pub fn split_batch<S>(&self, texts: &[S]) -> Vec<Vec<Node>>
    where
        S: AsRef<str> + Sync,
    {
        texts.iter().map(|text| self.split(text.as_ref())).collect()
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            rules: Rules::standard(),
        }
    }
}

fn default_splitter() -> &'static Splitter {
    static DEFAULT: OnceLock<Splitter> = OnceLock::new();
    DEFAULT.get_or_init(Splitter::default)
}

/// Split `text` with the default options
pub fn split(text: &str) -> Vec<Node> {
    default_splitter().split(text)
}

/// Split a TxtAST parent node with the default options
pub fn split_ast(node: &TxtNode) -> Result<SplitParent> {
    default_splitter().split_ast(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::{sentences, LineColumn, Location, Span};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_splitter_is_send_sync() {
        assert_send_sync::<Splitter>();
    }

    #[test]
    fn test_split_basic() {
        let nodes = split("Hello World. My name is Jonas.");
        let raws: Vec<&str> = nodes.iter().map(Node::raw).collect();
        assert_eq!(raws, vec!["Hello World.", " ", "My name is Jonas."]);
    }

    #[test]
    fn test_split_ast_keeps_parent_fields() {
        let loc = Location::new(LineColumn::new(1, 0), LineColumn::new(1, 7));
        let paragraph = TxtNode::parent(
            "Paragraph",
            "A. B c.",
            Span::new(0, 7),
            loc,
            vec![TxtNode::text("A. B c.", Span::new(0, 7), loc)],
        );

        let result = split_ast(&paragraph).unwrap();
        assert_eq!(result.node_type, "Paragraph");
        assert_eq!(result.raw, "A. B c.");
        let texts: Vec<&str> = sentences(&result.children).map(|s| s.text()).collect();
        assert_eq!(texts, vec!["A.", "B c."]);
    }

    #[test]
    fn test_split_batch_preserves_order() {
        let splitter = Splitter::default();
        let results = splitter.split_batch(&["One. Two.", "Three", ""]);

        assert_eq!(results.len(), 3);
        assert_eq!(sentences(&results[0]).count(), 2);
        assert_eq!(results[1][0].raw(), "Three");
        assert!(results[2].is_empty());
    }

    #[test]
    fn test_custom_separator() {
        let config = SplitterConfig::builder().separators(['♪']).build().unwrap();
        let splitter = Splitter::new(config).unwrap();
        let nodes = splitter.split("a♪b. c");
        assert_eq!(sentences(&nodes).count(), 2);
        assert_eq!(nodes[1].raw(), "b. c");
    }
}
