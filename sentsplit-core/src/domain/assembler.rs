//! Sentence assembly.
//!
//! The [`SentenceAssembler`] turns boundary runs into leaves and groups them
//! into sentences. At most one sentence is open at a time; it lives on the
//! stack as a [`SentenceBuilder`] and is finalized when a separator run (or
//! the end of input) closes it.

use log::{debug, trace};

use crate::api::Result;
use crate::domain::boundary::{Boundary, Rules};
use crate::domain::node::{ForeignKind, Leaf, Location, Node, Sentence, Span, TxtNode};
use crate::domain::source::SourceCursor;
use crate::domain::state::ScanState;

/// Sentence still receiving children.
#[derive(Debug, Default)]
pub struct SentenceBuilder {
    children: Vec<Node>,
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze into a sentence ending at the cursor; `None` when empty
    pub fn finish(self, cursor: &SourceCursor<'_>, state: &mut ScanState) -> Option<Sentence> {
        let first = self.children.first()?;
        let start = first.range().start;
        let start_loc = first.loc().start;
        let end = cursor.now();
        let range = Span::new(start, end.offset);

        Some(Sentence {
            raw: cursor.slice(start, end.offset).to_string(),
            range,
            loc: Location::new(start_loc, end.line_column()),
            contexts: state.take_contexts_within(range),
            children: self.children,
        })
    }
}

pub struct SentenceAssembler<'r> {
    rules: &'r Rules,
    state: ScanState,
    stack: Vec<SentenceBuilder>,
    results: Vec<Node>,
}

impl<'r> SentenceAssembler<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        Self {
            rules,
            state: ScanState::new(),
            stack: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn test(&self, boundary: Boundary, cursor: &SourceCursor<'_>) -> bool {
        boundary.test(self.rules, cursor, &self.state)
    }

    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn open(&mut self) {
        self.stack.push(SentenceBuilder::new());
    }

    /// Append to the open sentence, or to the result when none is open.
    ///
    /// Adjacent whitespace leaves are merged into one.
    pub fn push_to_current(&mut self, node: Node) {
        let container = match self.stack.last_mut() {
            Some(builder) => &mut builder.children,
            None => &mut self.results,
        };

        if let (Node::WhiteSpace(next), Some(Node::WhiteSpace(previous))) =
            (&node, container.last_mut())
        {
            if previous.range.end == next.range.start {
                previous.value.push_str(&next.value);
                previous.raw.push_str(&next.raw);
                previous.range.end = next.range.end;
                previous.loc.end = next.loc.end;
                return;
            }
        }

        container.push(node);
    }

    pub fn next_line(&mut self, cursor: &mut SourceCursor<'_>) {
        if let Some(leaf) = self.take(Boundary::NewLine, cursor) {
            self.push_to_current(Node::WhiteSpace(leaf));
        }
    }

    pub fn next_space(&mut self, cursor: &mut SourceCursor<'_>) {
        if let Some(leaf) = self.take(Boundary::Space, cursor) {
            self.push_to_current(Node::WhiteSpace(leaf));
        }
    }

    pub fn next_value(&mut self, cursor: &mut SourceCursor<'_>) {
        if let Some(leaf) = self.take(Boundary::AnyValue, cursor) {
            self.push_to_current(Node::Str(leaf));
        }
    }

    /// Push a foreign node unchanged and step over it
    pub fn push_foreign(&mut self, node: &TxtNode, cursor: &mut SourceCursor<'_>) {
        self.push_to_current(Node::Foreign(node.clone()));
        cursor.advance_past(node);
    }

    /// Consume the trailing run of `boundary` and finalize the open sentence
    pub fn close(&mut self, boundary: Boundary, cursor: &mut SourceCursor<'_>) {
        if let Some(leaf) = self.take(boundary, cursor) {
            if leaf.raw.chars().all(char::is_whitespace) {
                self.push_to_current(Node::WhiteSpace(leaf));
            } else {
                if !self.is_open() {
                    self.open();
                }
                self.push_to_current(Node::Punctuation(leaf));
            }
        }

        let Some(builder) = self.stack.pop() else {
            return;
        };
        if let Some(sentence) = builder.finish(cursor, &mut self.state) {
            debug!(
                "sentence {}..{} with {} children",
                sentence.range.start,
                sentence.range.end,
                sentence.children.len()
            );
            self.results.push(Node::Sentence(sentence));
        }
    }

    pub fn finish(self) -> Vec<Node> {
        self.results
    }

    fn take(&mut self, boundary: Boundary, cursor: &mut SourceCursor<'_>) -> Option<Leaf> {
        let start = cursor.now();
        boundary.consume(self.rules, cursor, &mut self.state);
        let end = cursor.now();

        if start.offset == end.offset {
            return None;
        }
        Some(Leaf::new(cursor.slice(start.offset, end.offset), &start, &end))
    }
}

/// Dispatch on the character under the cursor
fn step(assembler: &mut SentenceAssembler<'_>, cursor: &mut SourceCursor<'_>) {
    if assembler.test(Boundary::NewLine, cursor) {
        trace!("new line at {}", cursor.offset());
        assembler.next_line(cursor);
    } else if assembler.test(Boundary::Space, cursor) {
        trace!("space at {}", cursor.offset());
        assembler.next_space(cursor);
    } else if assembler.test(Boundary::Separator, cursor) {
        trace!("separator at {}", cursor.offset());
        assembler.close(Boundary::Separator, cursor);
    } else {
        if !assembler.is_open() {
            trace!("open sentence at {}", cursor.offset());
            assembler.open();
        }
        trace!("value at {}", cursor.offset());
        assembler.next_value(cursor);
    }
}

/// Split a plain string into sentence and whitespace nodes
pub fn assemble_text(rules: &Rules, text: &str) -> Vec<Node> {
    let mut cursor = SourceCursor::from_text(text);
    let mut assembler = SentenceAssembler::new(rules);

    while !cursor.at_end() {
        step(&mut assembler, &mut cursor);
    }
    assembler.close(Boundary::Space, &mut cursor);

    assembler.finish()
}

/// Re-segment the children of a TxtAST parent node
pub fn assemble_node(rules: &Rules, parent: &TxtNode) -> Result<Vec<Node>> {
    let mut cursor = SourceCursor::from_node(parent)?;
    let mut assembler = SentenceAssembler::new(rules);

    while let Some(node) = cursor.current_node() {
        match node.kind() {
            ForeignKind::Text => step(&mut assembler, &mut cursor),
            ForeignKind::LineBreak => {
                trace!("break at {}", cursor.offset());
                assembler.push_foreign(node, &mut cursor);
            }
            ForeignKind::Other => {
                if !assembler.is_open() {
                    trace!("open sentence at {}", cursor.offset());
                    assembler.open();
                }
                trace!("{} node at {}", node.node_type, cursor.offset());
                assembler.push_foreign(node, &mut cursor);
            }
        }
    }
    assembler.close(Boundary::Space, &mut cursor);

    Ok(assembler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::{LineColumn, NodeKind};

    fn kinds(nodes: &[Node]) -> Vec<NodeKind> {
        nodes.iter().map(Node::kind).collect()
    }

    #[test]
    fn test_single_sentence() {
        let nodes = assemble_text(&Rules::standard(), "text");
        assert_eq!(kinds(&nodes), vec![NodeKind::Sentence]);

        let sentence = nodes[0].as_sentence().unwrap();
        assert_eq!(sentence.raw, "text");
        assert_eq!(sentence.loc.start, LineColumn::new(1, 0));
        assert_eq!(sentence.loc.end, LineColumn::new(1, 4));
    }

    #[test]
    fn test_separator_closes_sentence() {
        let nodes = assemble_text(&Rules::standard(), "text。。text");
        assert_eq!(kinds(&nodes), vec![NodeKind::Sentence, NodeKind::Sentence]);

        let children = nodes[0].children();
        assert_eq!(kinds(children), vec![NodeKind::Str, NodeKind::Punctuation]);
        assert_eq!(children[1].raw(), "。。");
        assert_eq!(nodes[1].raw(), "text");
    }

    #[test]
    fn test_whitespace_runs_merge() {
        let nodes = assemble_text(&Rules::standard(), "1st text. \n 2nd text");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].kind(), NodeKind::WhiteSpace);
        assert_eq!(nodes[1].raw(), " \n ");
        assert_eq!(nodes[1].range(), Span::new(9, 12));
        assert_eq!(nodes[2].range(), Span::new(12, 20));
    }

    #[test]
    fn test_leading_separator_opens_sentence() {
        let nodes = assemble_text(&Rules::standard(), "! a");
        assert_eq!(
            kinds(&nodes),
            vec![NodeKind::Sentence, NodeKind::WhiteSpace, NodeKind::Sentence]
        );
        assert_eq!(kinds(nodes[0].children()), vec![NodeKind::Punctuation]);
    }

    #[test]
    fn test_empty_text() {
        assert!(assemble_text(&Rules::standard(), "").is_empty());
    }

    #[test]
    fn test_contexts_attached_to_sentence() {
        let nodes = assemble_text(&Rules::standard(), r#""Stop!" he said. Then left."#);
        assert_eq!(nodes.len(), 3);

        let first = nodes[0].as_sentence().unwrap();
        assert_eq!(first.raw, r#""Stop!" he said."#);
        assert_eq!(first.contexts.len(), 1);
        assert_eq!(first.contexts[0].kind, "double quote");
        assert_eq!(first.contexts[0].range, Span::new(0, 7));
        assert!(nodes[2].as_sentence().unwrap().contexts.is_empty());
    }

    #[test]
    fn test_builder_discards_empty_sentence() {
        let cursor = SourceCursor::from_text("");
        let mut state = ScanState::new();
        assert!(SentenceBuilder::new().finish(&cursor, &mut state).is_none());
    }
}
