use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Result, TagsError};
use crate::indexer::extractor::TagExtractor;
use crate::indexer::parser::{ParsedFile, Parser};
use crate::languages::LanguageRegistry;
use crate::tags::{sort_tag_lines, TagLine};

#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Index files with syntax errors from whatever tree-sitter recovered
    /// instead of rejecting them
    pub tolerant: bool,
}

/// Outcome of indexing a set of files.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Tag lines of every successfully indexed file, sorted by full name
    pub lines: Vec<TagLine>,
    /// One entry per file that contributed no tags because it failed
    pub failures: Vec<TagsError>,
    pub files_indexed: usize,
}

impl BatchResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub struct TagIndexer {
    parser: Parser,
    extractor: TagExtractor,
    options: IndexOptions,
}

impl TagIndexer {
    pub fn new(registry: LanguageRegistry, options: IndexOptions) -> Self {
        Self {
            parser: Parser::new(registry),
            extractor: TagExtractor::new(),
            options,
        }
    }

    /// Tags of one file, unsorted, bound to `path` as written.
    pub fn index_file(&self, path: &Path) -> Result<Vec<TagLine>> {
        let parsed = self.parser.parse_file(path)?;
        self.index_parsed(&parsed, &path.display().to_string())
    }

    /// Tags of in-memory source, identified as `file` in the output.
    pub fn index_source(&self, source: &str, file: &str) -> Result<Vec<TagLine>> {
        let grammar = self
            .parser
            .get_grammar(Path::new(file))
            .ok_or_else(|| TagsError::UnsupportedLanguage(file.to_string()))?;
        let parsed = self.parser.parse_source(source, grammar)?;
        self.index_parsed(&parsed, file)
    }

    fn index_parsed(&self, parsed: &ParsedFile, file: &str) -> Result<Vec<TagLine>> {
        if let Err(failure) = parsed.check() {
            if !self.options.tolerant {
                return Err(TagsError::Parse {
                    path: file.to_string(),
                    failure,
                });
            }
            tracing::warn!("{}:{}; indexing recovered tree", file, failure);
        }

        let tags = self.extractor.extract_parsed(parsed);
        tracing::debug!("{}: {} tags", file, tags.len());

        Ok(tags
            .into_iter()
            .map(|tag| TagLine::new(tag, file, parsed.language))
            .collect())
    }

    /// Indexes `files` in parallel. A failing file is recorded and skipped;
    /// it never prevents the others from being indexed. `on_file` runs once
    /// per file as it completes.
    pub fn index_files<F>(&self, files: &[PathBuf], on_file: F) -> BatchResult
    where
        F: Fn() + Sync,
    {
        let results: Vec<Result<Vec<TagLine>>> = files
            .par_iter()
            .map(|file| {
                let result = self.index_file(file);
                on_file();
                result
            })
            .collect();

        let mut batch = BatchResult::default();
        for result in results {
            match result {
                Ok(lines) => {
                    batch.files_indexed += 1;
                    batch.lines.extend(lines);
                }
                Err(e) => batch.failures.push(e),
            }
        }
        sort_tag_lines(&mut batch.lines);

        tracing::info!(
            "Indexed {} tags from {} files ({} failed)",
            batch.lines.len(),
            batch.files_indexed,
            batch.failures.len()
        );
        batch
    }
}
