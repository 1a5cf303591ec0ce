//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentsplit_core::{sentences, Node};
use std::io::Write;

/// Plain text formatter - outputs one line per sentence, numbered from zero
pub struct TextFormatter<W: Write> {
    writer: W,
    headers: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            headers: false,
        }
    }

    /// Print `==> input <==` before each document
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, input: &str, nodes: &[Node]) -> Result<()> {
        if self.headers {
            writeln!(self.writer, "==> {input} <==")?;
        }
        for (index, sentence) in sentences(nodes).enumerate() {
            writeln!(self.writer, "Sentence {index}: {}", sentence.raw)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
