//! Source cursor shared by both input modes.
//!
//! A [`SourceCursor`] presents plain text and TxtAST subtrees through the
//! same read/advance/position interface. Offsets are always absolute into the
//! original document: when wrapping a subtree the cursor adds the subtree's
//! own start offset, and line/column numbers continue from its `loc.start`.

use log::{debug, warn};

use crate::api::{Result, SplitError};
use crate::domain::node::{ForeignKind, LineColumn, Position, TxtNode};

/// Line lookup over the cursor's character array.
#[derive(Debug, Clone)]
struct LineIndex {
    /// Character index at which each line starts
    line_starts: Vec<usize>,
    /// Position of the first character
    origin: LineColumn,
}

impl LineIndex {
    fn new(chars: &[(usize, char)], origin: LineColumn) -> Self {
        let mut line_starts = vec![0];

        // `\n`, `\r\n` and a lone `\r` each end one line
        for (index, &(_, ch)) in chars.iter().enumerate() {
            let lone_cr = ch == '\r' && !matches!(chars.get(index + 1), Some(&(_, '\n')));
            if ch == '\n' || lone_cr {
                line_starts.push(index + 1);
            }
        }

        Self {
            line_starts,
            origin,
        }
    }

    fn line_column(&self, index: usize) -> LineColumn {
        let line = self
            .line_starts
            .binary_search(&index)
            .unwrap_or_else(|i| i - 1);

        if line == 0 {
            LineColumn::new(self.origin.line, self.origin.column + index)
        } else {
            LineColumn::new(self.origin.line + line, index - self.line_starts[line])
        }
    }
}

/// Cursor over the characters of a text or a TxtAST subtree.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    text: &'a str,
    /// Byte offset (relative to `text`) and character
    chars: Vec<(usize, char)>,
    /// Current character index
    index: usize,
    /// First readable character index
    start: usize,
    /// Absolute offset of `text[0]`
    base_offset: usize,
    lines: LineIndex,
    children: &'a [TxtNode],
    tree: bool,
}

impl<'a> SourceCursor<'a> {
    /// Cursor over a plain string starting at line 1, column 0, offset 0
    pub fn from_text(text: &'a str) -> Self {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let lines = LineIndex::new(&chars, LineColumn::new(1, 0));

        Self {
            text,
            chars,
            index: 0,
            start: 0,
            base_offset: 0,
            lines,
            children: &[],
            tree: false,
        }
    }

    /// Cursor over the children of a TxtAST parent node.
    ///
    /// The node's structure is validated first so that every later
    /// `advance_past` moves forward.
    pub fn from_node(node: &'a TxtNode) -> Result<Self> {
        validate_tree(node)?;

        let chars: Vec<(usize, char)> = node.raw.char_indices().collect();
        let lines = LineIndex::new(&chars, node.loc.start);
        let mut cursor = Self {
            text: &node.raw,
            chars,
            index: 0,
            start: 0,
            base_offset: node.range.start,
            lines,
            children: node.children(),
            tree: true,
        };

        // e.g. a Header's text starts after its `# ` marker
        if let Some(first) = cursor.children.first() {
            cursor.start = cursor.index_of(first.range.start);
            cursor.index = cursor.start;
        }

        Ok(cursor)
    }

    /// Character `ahead` positions after the cursor, without moving it
    pub fn read(&self, ahead: usize) -> Option<char> {
        self.readable(self.index + ahead)
    }

    /// Character `ahead` positions after the cursor in the underlying text.
    ///
    /// Unlike [`read`](Self::read) this also sees characters of foreign
    /// children, so look-ahead rules can tell an inline node from the end of
    /// input.
    pub fn peek_raw(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).map(|&(_, ch)| ch)
    }

    /// Character `back` positions before the cursor
    pub fn read_behind(&self, back: usize) -> Option<char> {
        self.index
            .checked_sub(back)
            .and_then(|index| self.readable(index))
    }

    pub fn advance(&mut self) {
        if self.index < self.chars.len() {
            self.index += 1;
        }
    }

    pub fn advance_by(&mut self, count: usize) {
        self.index = (self.index + count).min(self.chars.len());
    }

    /// Move the cursor to the end of `node`; never moves backwards
    pub fn advance_past(&mut self, node: &TxtNode) {
        let target = self.index_of(node.range.end);
        if target > self.index {
            self.index = target;
        }
    }

    /// Absolute byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.base_offset + self.relative_offset(self.index)
    }

    /// Absolute position of the cursor
    pub fn now(&self) -> Position {
        let lc = self.lines.line_column(self.index);
        Position::new(lc.line, lc.column, self.offset())
    }

    /// True when no readable character is under the cursor
    pub fn at_end(&self) -> bool {
        self.read(0).is_none()
    }

    /// Text between two absolute offsets
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = start.saturating_sub(self.base_offset);
        let to = end.saturating_sub(self.base_offset);
        self.text.get(from..to).unwrap_or_default()
    }

    /// Child node covering the cursor (tree mode only).
    ///
    /// Text not covered by any child is skipped.
    pub fn current_node(&mut self) -> Option<&'a TxtNode> {
        let children = self.children;
        let offset = self.offset();
        let position = children.partition_point(|child| child.range.end <= offset);
        let node = children.get(position)?;

        if node.range.start > offset {
            debug!(
                "skipping text {}..{} not covered by any child",
                offset, node.range.start
            );
            self.index = self.index_of(node.range.start);
        }

        Some(node)
    }

    fn readable(&self, index: usize) -> Option<char> {
        if index < self.start {
            return None;
        }
        let &(byte, ch) = self.chars.get(index)?;
        if self.tree && !self.is_text_at(self.base_offset + byte) {
            return None;
        }
        Some(ch)
    }

    fn is_text_at(&self, offset: usize) -> bool {
        let position = self
            .children
            .partition_point(|child| child.range.end <= offset);

        self.children.get(position).is_some_and(|child| {
            child.range.start <= offset && child.kind() == ForeignKind::Text
        })
    }

    fn relative_offset(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map_or(self.text.len(), |&(byte, _)| byte)
    }

    /// Character index of an absolute offset (end of text if past it)
    fn index_of(&self, offset: usize) -> usize {
        let relative = offset.saturating_sub(self.base_offset);
        match self.chars.binary_search_by_key(&relative, |&(byte, _)| byte) {
            Ok(index) | Err(index) => index,
        }
    }
}

/// Check that a parent's children can be scanned front to back.
pub fn validate_tree(node: &TxtNode) -> Result<()> {
    let range = node.range;
    if range.start > range.end {
        return Err(SplitError::Structure(format!(
            "{} range {}..{} is inverted",
            node.node_type, range.start, range.end
        )));
    }
    if node.raw.len() != range.len() {
        return Err(SplitError::Structure(format!(
            "{} raw text is {} bytes but its range {}..{} covers {}",
            node.node_type,
            node.raw.len(),
            range.start,
            range.end,
            range.len()
        )));
    }

    let mut previous_end = range.start;
    for (position, child) in node.children().iter().enumerate() {
        let child_range = child.range;

        if child_range.start > child_range.end {
            return Err(SplitError::Structure(format!(
                "child {position} ({}) range {}..{} is inverted",
                child.node_type, child_range.start, child_range.end
            )));
        }
        if !range.encloses(&child_range) {
            return Err(SplitError::Structure(format!(
                "child {position} ({}) range {}..{} lies outside its parent {}..{}",
                child.node_type, child_range.start, child_range.end, range.start, range.end
            )));
        }
        if child_range.start < previous_end {
            return Err(SplitError::Structure(format!(
                "child {position} ({}) starts at {} before the previous child ends at {}",
                child.node_type, child_range.start, previous_end
            )));
        }

        let from = child_range.start - range.start;
        let to = child_range.end - range.start;
        if !node.raw.is_char_boundary(from) || !node.raw.is_char_boundary(to) {
            return Err(SplitError::Structure(format!(
                "child {position} ({}) range {}..{} splits a character",
                child.node_type, child_range.start, child_range.end
            )));
        }
        if child.raw.len() != child_range.len() {
            return Err(SplitError::Structure(format!(
                "child {position} ({}) raw text is {} bytes but its range covers {}",
                child.node_type,
                child.raw.len(),
                child_range.len()
            )));
        }
        if child_range.is_empty() {
            warn!(
                "skipping zero-width {} child at offset {}",
                child.node_type, child_range.start
            );
        }

        previous_end = child_range.end;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::{Location, Span};

    fn loc(l1: usize, c1: usize, l2: usize, c2: usize) -> Location {
        Location::new(LineColumn::new(l1, c1), LineColumn::new(l2, c2))
    }

    #[test]
    fn test_read_does_not_move_cursor() {
        let cursor = SourceCursor::from_text("abc");
        assert_eq!(cursor.read(0), Some('a'));
        assert_eq!(cursor.read(2), Some('c'));
        assert_eq!(cursor.read(3), None);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_positions_across_lines() {
        let mut cursor = SourceCursor::from_text("ab\ncd");
        cursor.advance_by(4);

        assert_eq!(cursor.read(0), Some('d'));
        assert_eq!(cursor.now(), Position::new(2, 1, 4));
        assert_eq!(cursor.read_behind(1), Some('c'));
    }

    #[test]
    fn test_carriage_returns_start_lines() {
        let mut cursor = SourceCursor::from_text("a\rb\r\nc");
        cursor.advance_by(2);
        assert_eq!(cursor.now(), Position::new(2, 0, 2));
        cursor.advance_by(3);
        assert_eq!(cursor.now(), Position::new(3, 0, 5));
    }

    #[test]
    fn test_offsets_are_bytes_and_columns_are_characters() {
        let mut cursor = SourceCursor::from_text("日本語.");
        cursor.advance_by(3);

        assert_eq!(cursor.read(0), Some('.'));
        assert_eq!(cursor.now(), Position::new(1, 3, 9));
        assert_eq!(cursor.slice(0, 9), "日本語");
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut cursor = SourceCursor::from_text("ab");
        cursor.advance_by(10);
        assert!(cursor.at_end());
        cursor.advance();
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_subtree_offsets_are_absolute() {
        let paragraph = TxtNode::parent(
            "Paragraph",
            "Hi there",
            Span::new(10, 18),
            loc(3, 0, 3, 8),
            vec![TxtNode::text("Hi there", Span::new(10, 18), loc(3, 0, 3, 8))],
        );
        let mut cursor = SourceCursor::from_node(&paragraph).unwrap();

        assert_eq!(cursor.now(), Position::new(3, 0, 10));
        cursor.advance_by(3);
        assert_eq!(cursor.now(), Position::new(3, 3, 13));
        assert_eq!(cursor.slice(13, 18), "there");
    }

    #[test]
    fn test_subtree_padding_before_first_child() {
        let header = TxtNode::parent(
            "Header",
            "# Title",
            Span::new(0, 7),
            loc(1, 0, 1, 7),
            vec![TxtNode::text("Title", Span::new(2, 7), loc(1, 2, 1, 7))],
        );
        let cursor = SourceCursor::from_node(&header).unwrap();

        assert_eq!(cursor.read(0), Some('T'));
        assert_eq!(cursor.read_behind(1), None);
        assert_eq!(cursor.now(), Position::new(1, 2, 2));
    }

    #[test]
    fn test_foreign_children_are_not_readable() {
        let paragraph = TxtNode::parent(
            "Paragraph",
            "a `b` c",
            Span::new(0, 7),
            loc(1, 0, 1, 7),
            vec![
                TxtNode::text("a ", Span::new(0, 2), loc(1, 0, 1, 2)),
                TxtNode::new("Code", "`b`", Span::new(2, 5), loc(1, 2, 1, 5)),
                TxtNode::text(" c", Span::new(5, 7), loc(1, 5, 1, 7)),
            ],
        );
        let mut cursor = SourceCursor::from_node(&paragraph).unwrap();

        assert_eq!(cursor.read(1), Some(' '));
        assert_eq!(cursor.read(2), None);
        assert_eq!(cursor.read(5), Some(' '));
        assert_eq!(cursor.peek_raw(2), Some('`'));

        cursor.advance_by(2);
        let code = cursor.current_node().unwrap();
        assert_eq!(code.node_type, "Code");
        cursor.advance_past(code);
        assert_eq!(cursor.offset(), 5);
        assert_eq!(cursor.current_node().unwrap().raw, " c");
    }

    #[test]
    fn test_current_node_ends_after_last_child() {
        let paragraph = TxtNode::parent(
            "Paragraph",
            "ab",
            Span::new(0, 2),
            loc(1, 0, 1, 2),
            vec![TxtNode::text("ab", Span::new(0, 2), loc(1, 0, 1, 2))],
        );
        let mut cursor = SourceCursor::from_node(&paragraph).unwrap();
        cursor.advance_by(2);
        assert!(cursor.current_node().is_none());
    }

    #[test]
    fn test_validate_rejects_overlapping_children() {
        let paragraph = TxtNode::parent(
            "Paragraph",
            "abcd",
            Span::new(0, 4),
            loc(1, 0, 1, 4),
            vec![
                TxtNode::text("abc", Span::new(0, 3), loc(1, 0, 1, 3)),
                TxtNode::text("cd", Span::new(2, 4), loc(1, 2, 1, 4)),
            ],
        );

        let error = SourceCursor::from_node(&paragraph).unwrap_err();
        assert!(matches!(error, SplitError::Structure(_)));
        assert!(error.to_string().contains("before the previous child"));
    }

    #[test]
    fn test_validate_rejects_child_outside_parent() {
        let paragraph = TxtNode::parent(
            "Paragraph",
            "ab",
            Span::new(0, 2),
            loc(1, 0, 1, 2),
            vec![TxtNode::text("abc", Span::new(0, 3), loc(1, 0, 1, 3))],
        );

        assert!(matches!(
            validate_tree(&paragraph),
            Err(SplitError::Structure(_))
        ));
    }

    #[test]
    fn test_validate_rejects_range_inside_character() {
        let paragraph = TxtNode::parent(
            "Paragraph",
            "日本",
            Span::new(0, 6),
            loc(1, 0, 1, 2),
            vec![TxtNode::text("x", Span::new(0, 1), loc(1, 0, 1, 1))],
        );

        let error = validate_tree(&paragraph).unwrap_err();
        assert!(error.to_string().contains("splits a character"));
    }

    #[test]
    fn test_validate_rejects_raw_length_mismatch() {
        let paragraph = TxtNode::parent("Paragraph", "abc", Span::new(0, 5), loc(1, 0, 1, 5), vec![]);
        assert!(validate_tree(&paragraph).is_err());
    }
}
