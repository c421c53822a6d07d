use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;
use crate::tags::TagLine;

/// Output format of the tags file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Extended ctags format, one tab-separated line per tag
    #[default]
    Ctags,
    /// One JSON object per line
    #[value(alias = "jsonl")]
    Json,
}

#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub format: OutputFormat,
    /// Emit `!_TAG_` pseudo-tags before the tag lines (ctags format only)
    pub header: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Ctags,
            header: true,
        }
    }
}

#[derive(Serialize)]
struct JsonTag<'a> {
    #[serde(rename = "_type")]
    kind: &'static str,
    name: &'a str,
    path: &'a str,
    line: u32,
    column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    #[serde(rename = "fileLocal", skip_serializing_if = "std::ops::Not::not")]
    file_local: bool,
    language: &'a str,
}

impl<'a> From<&'a TagLine> for JsonTag<'a> {
    fn from(line: &'a TagLine) -> Self {
        Self {
            kind: "tag",
            name: &line.tag.name,
            path: &line.file,
            line: line.tag.position.line,
            column: line.tag.position.column,
            scope: line.tag.qualifier.as_deref(),
            file_local: line.tag.is_file_local,
            language: line.language,
        }
    }
}

/// Writes already sorted tag lines.
pub struct TagWriter {
    options: WriteOptions,
}

impl TagWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Writes to `path`, or to stdout when `path` is `-`.
    pub fn write_to_path(&self, path: &Path, lines: &[TagLine]) -> Result<()> {
        if path == Path::new("-") {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            self.write(&mut out, lines)?;
            out.flush()?;
        } else {
            let mut out = BufWriter::new(File::create(path)?);
            self.write(&mut out, lines)?;
            out.flush()?;
        }
        tracing::debug!("Wrote {} tags to {}", lines.len(), path.display());
        Ok(())
    }

    pub fn write<W: Write>(&self, out: &mut W, lines: &[TagLine]) -> Result<()> {
        match self.options.format {
            OutputFormat::Ctags => {
                if self.options.header {
                    write_header(out)?;
                }
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                for line in lines {
                    serde_json::to_writer(&mut *out, &JsonTag::from(line))?;
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    pub fn render(&self, lines: &[TagLine]) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf, lines)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "!_TAG_FILE_FORMAT\t2\t/extended format; --format=1 will not append ;\" to lines/"
    )?;
    writeln!(out, "!_TAG_FILE_SORTED\t1\t/0=unsorted, 1=sorted, 2=foldcase/")?;
    writeln!(out, "!_TAG_PROGRAM_NAME\t{}\t//", env!("CARGO_PKG_NAME"))?;
    writeln!(out, "!_TAG_PROGRAM_VERSION\t{}\t//", env!("CARGO_PKG_VERSION"))
}
