use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use scala_ctags::error::{Result, TagsError};
use scala_ctags::indexer::{FileWalker, IndexOptions, TagIndexer};
use scala_ctags::languages::LanguageRegistry;
use scala_ctags::tags::{OutputFormat, TagWriter, WriteOptions};

#[derive(Parser)]
#[command(name = "scala-ctags")]
#[command(about = "Generate a ctags index of Scala declarations using tree-sitter")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Index a project into ./tags
    scala-ctags src/

    # Index a few files and print the tags
    scala-ctags -f - Main.scala util/Strings.scala

    # Skip generated sources, keep going on files with syntax errors
    scala-ctags --exclude '*/target/*' --tolerant .

    # JSON lines instead of a tags file
    scala-ctags --format json -f tags.json src/
"#)]
pub struct Cli {
    /// Files or directories to index
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Tags file to write, `-` for stdout
    #[arg(short = 'f', long = "output", default_value = "tags")]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Ctags)]
    pub format: OutputFormat,

    /// Omit the !_TAG_ pseudo-tag header
    #[arg(long)]
    pub no_header: bool,

    /// Skip paths matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Also index hidden and git-ignored files
    #[arg(long)]
    pub no_ignore: bool,

    /// Index files with syntax errors instead of failing them
    #[arg(long)]
    pub tolerant: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,
}

/// Indexes every path on the command line and writes one sorted tags file.
///
/// Paths and files that fail are reported on stderr and left out of the
/// output. Returns how many failed. Errors that are not tied to a single
/// path abort before anything is written.
pub fn generate_tags(cli: &Cli) -> Result<usize> {
    let walker = FileWalker::new(LanguageRegistry::new())
        .with_excludes(&cli.exclude)?
        .respect_ignore(!cli.no_ignore);
    let walked = walker.walk_all(&cli.paths);
    tracing::debug!("Found {} files to index", walked.files.len());

    let indexer = TagIndexer::new(
        LanguageRegistry::new(),
        IndexOptions {
            tolerant: cli.tolerant,
        },
    );

    let progress = if cli.progress {
        let bar = ProgressBar::new(walked.files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} files") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut batch = indexer.index_files(&walked.files, || progress.inc(1));
    progress.finish_and_clear();

    let mut failures = walked.errors;
    failures.append(&mut batch.failures);
    if let Some(index) = failures.iter().position(|e| !e.is_per_file()) {
        return Err(failures.swap_remove(index));
    }
    report_failures(&mut io::stderr().lock(), &failures)?;

    let writer = TagWriter::new(WriteOptions {
        format: cli.format,
        header: !cli.no_header,
    });
    writer.write_to_path(&cli.output, &batch.lines)?;

    Ok(failures.len())
}

fn report_failures<W: Write>(out: &mut W, failures: &[TagsError]) -> io::Result<()> {
    for failure in failures {
        writeln!(out, "error: {}", failure)?;
    }
    Ok(())
}
