//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentsplit_core::Node;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs every document with its node tree as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct DocumentData {
    /// Input name (`<stdin>` or the file path)
    pub input: String,
    /// Top-level nodes returned by the splitter
    pub children: serde_json::Value,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, input: &str, nodes: &[Node]) -> Result<()> {
        self.documents.push(DocumentData {
            input: input.to_string(),
            children: serde_json::to_value(nodes)?,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
