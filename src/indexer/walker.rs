use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;

use crate::error::{Result, TagsError};
use crate::languages::LanguageRegistry;

/// Files found by a walk, plus the paths that could not be read.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub files: Vec<PathBuf>,
    pub errors: Vec<TagsError>,
}

pub struct FileWalker {
    registry: LanguageRegistry,
    excludes: Vec<Pattern>,
    respect_ignore: bool,
}

impl FileWalker {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self {
            registry,
            excludes: Vec::new(),
            respect_ignore: true,
        }
    }

    /// Skips paths matching any of the given glob patterns
    pub fn with_excludes(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            self.excludes.push(Pattern::new(pattern)?);
        }
        Ok(self)
    }

    /// Whether `.gitignore`, `.ignore` and hidden-file rules apply
    pub fn respect_ignore(mut self, respect: bool) -> Self {
        self.respect_ignore = respect;
        self
    }

    /// Collects supported files under `root`. A file given directly is
    /// returned as-is when supported. Unreadable entries are recorded in
    /// `errors` and the walk goes on.
    pub fn walk(&self, root: &Path) -> WalkResult {
        let mut result = WalkResult::default();
        self.walk_into(root, &mut result);
        result
    }

    /// Walks every root and returns the union, sorted and deduplicated.
    pub fn walk_all(&self, roots: &[PathBuf]) -> WalkResult {
        let mut result = WalkResult::default();
        for root in roots {
            self.walk_into(root, &mut result);
        }
        result.files.sort();
        result.files.dedup();
        result
    }

    fn walk_into(&self, root: &Path, result: &mut WalkResult) {
        if root.is_file() {
            if self.is_supported(root) && !self.is_excluded(root) {
                result.files.push(root.to_path_buf());
            } else {
                tracing::warn!("Skipping unsupported file {}", root.display());
            }
            return;
        }

        let walker = WalkBuilder::new(root)
            .hidden(self.respect_ignore)
            .git_ignore(self.respect_ignore)
            .git_global(self.respect_ignore)
            .git_exclude(self.respect_ignore)
            .ignore(self.respect_ignore)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("{}", e);
                    result.errors.push(TagsError::Walk(e));
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.is_supported(path) && !self.is_excluded(path) {
                result.files.push(path.to_path_buf());
            }
        }
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        self.registry.get_for_file(path).is_some()
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.iter().any(|p| p.matches_path(path))
    }
}
