//! JSON documents read and written by the commands.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};

/// Pretty-printed JSON destination, named in error messages by `label`.
pub struct JsonSink<W> {
    writer: W,
    label: String,
}

impl JsonSink<Box<dyn Write>> {
    /// The file at `path` (created or truncated), or stdout when no path is given.
    pub fn open(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::new(Box::new(io::stdout().lock()), "stdout"));
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::new(
            Box::new(BufWriter::new(file)),
            path.display().to_string(),
        ))
    }
}

impl<W> JsonSink<W>
where
    W: Write,
{
    pub fn new(writer: W, label: impl Into<String>) -> Self {
        Self {
            writer,
            label: label.into(),
        }
    }

    /// Writes `value` followed by a newline and flushes.
    pub fn write<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.label))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to flush output to {}", self.label))
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

/// Parses the JSON file at `path`; `what` names the document in errors.
pub fn load_json<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {what} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
}
