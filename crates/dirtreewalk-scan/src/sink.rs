//! Output sinks for walk records.

use std::io::{self, Write};

use serde::Serialize;

use dirtreewalk_core::{EntryRecord, WalkWarning};

/// Width of the kind column.
pub const KIND_WIDTH: usize = 15;
/// Width of the name column.
pub const NAME_WIDTH: usize = 40;
/// Width of the relative path column.
pub const PATH_WIDTH: usize = 40;

/// Receives records and diagnostics in visitation order.
pub trait EntrySink {
    /// Emit one entry line.
    fn entry(&mut self, record: &EntryRecord) -> io::Result<()>;

    /// Emit a recovered listing failure.
    fn diagnostic(&mut self, warning: &WalkWarning) -> io::Result<()>;

    /// Called once after the last record.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Format a record as a fixed-width line, without the trailing newline.
///
/// Columns are left-justified and separated by one space. Values longer
/// than their column are not truncated.
pub fn format_record(record: &EntryRecord) -> String {
    let kind = record.kind.to_string();
    let mut line = format!(
        "{:<KIND_WIDTH$} {:<NAME_WIDTH$} {:<PATH_WIDTH$}",
        kind,
        record.name.as_str(),
        record.relative_path.as_str()
    );
    if let Some(fingerprint) = &record.fingerprint {
        line.push(' ');
        line.push_str(&fingerprint.to_hex());
    }
    line
}

/// Plain text listing, diagnostics interleaved on the same writer.
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextSink<io::Stdout> {
    /// Text sink on standard output, flushed line by line.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> EntrySink for TextSink<W> {
    fn entry(&mut self, record: &EntryRecord) -> io::Result<()> {
        writeln!(self.writer, "{}", format_record(record))
    }

    fn diagnostic(&mut self, warning: &WalkWarning) -> io::Result<()> {
        writeln!(self.writer, "{}", warning.message)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonLine<'a> {
    Entry(&'a EntryRecord),
    Diagnostic(&'a WalkWarning),
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &JsonLine<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> EntrySink for JsonLinesSink<W> {
    fn entry(&mut self, record: &EntryRecord) -> io::Result<()> {
        self.write_line(&JsonLine::Entry(record))
    }

    fn diagnostic(&mut self, warning: &WalkWarning) -> io::Result<()> {
        self.write_line(&JsonLine::Diagnostic(warning))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Event captured by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Entry(EntryRecord),
    Diagnostic(WalkWarning),
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<SinkEvent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry records in emission order.
    pub fn records(&self) -> impl Iterator<Item = &EntryRecord> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Entry(record) => Some(record),
            SinkEvent::Diagnostic(_) => None,
        })
    }

    /// Diagnostics in emission order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &WalkWarning> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Diagnostic(warning) => Some(warning),
            SinkEvent::Entry(_) => None,
        })
    }

    /// Position of the first record with this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records().position(|record| record.name == name)
    }
}

impl EntrySink for CollectingSink {
    fn entry(&mut self, record: &EntryRecord) -> io::Result<()> {
        self.events.push(SinkEvent::Entry(record.clone()));
        Ok(())
    }

    fn diagnostic(&mut self, warning: &WalkWarning) -> io::Result<()> {
        self.events.push(SinkEvent::Diagnostic(warning.clone()));
        Ok(())
    }
}
