//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentsplit_core::{sentences, Node};
use std::io::Write;

/// Markdown formatter - outputs sentences as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    headers: bool,
    sentence_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            headers: false,
            sentence_count: 0,
        }
    }

    /// Start each document with a `## input` heading
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, input: &str, nodes: &[Node]) -> Result<()> {
        if self.headers {
            writeln!(self.writer, "## {input}")?;
            writeln!(self.writer)?;
        }
        for (index, sentence) in sentences(nodes).enumerate() {
            // Line breaks inside a sentence would end the list item
            let text = sentence.text().replace('\n', " ");
            writeln!(self.writer, "{}. {}", index + 1, text)?;
            self.sentence_count += 1;
        }
        if self.headers {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentsplit_core::split;

    #[test]
    fn test_markdown_list_and_total() {
        let nodes = split("これはペンです。それは\nマーカーです。");
        let mut buffer = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buffer);
            formatter.format_document("ja.txt", &nodes).unwrap();
            formatter.finish().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "1. これはペンです。\n2. それは マーカーです。\n\n---\n*Total sentences: 2*\n"
        );
    }

    #[test]
    fn test_total_counts_every_document() {
        let nodes = split("One. Two.");
        let mut buffer = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buffer).with_headers(true);
            formatter.format_document("a.txt", &nodes).unwrap();
            formatter.format_document("b.txt", &nodes).unwrap();
            formatter.finish().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("## a.txt\n\n1. One.\n2. Two.\n\n## b.txt\n"));
        assert!(output.ends_with("*Total sentences: 4*\n"));
    }
}
