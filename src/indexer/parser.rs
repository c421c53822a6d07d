use std::path::Path;
use std::sync::Arc;

use crate::error::{ParseFailure, Result, TagsError};
use crate::languages::{LanguageGrammar, LanguageRegistry};
use crate::tags::Position;

const SNIPPET_LEN: usize = 24;

pub struct Parser {
    registry: LanguageRegistry,
}

impl Parser {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self { registry }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        let grammar = self
            .registry
            .get_for_file(path)
            .ok_or_else(|| TagsError::UnsupportedLanguage(path.display().to_string()))?;

        let source = std::fs::read_to_string(path).map_err(|source| TagsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_source(&source, grammar)
    }

    pub fn parse_source(&self, source: &str, grammar: Arc<dyn LanguageGrammar>) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&grammar.language())
            .map_err(|e| TagsError::Grammar(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| TagsError::Grammar("Parser returned no tree".to_string()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_string(),
            language: grammar.name(),
        })
    }

    pub fn get_grammar(&self, path: &Path) -> Option<Arc<dyn LanguageGrammar>> {
        self.registry.get_for_file(path)
    }
}

pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub language: &'static str,
}

impl ParsedFile {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    pub fn node_text(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source_bytes()).unwrap_or("")
    }

    /// 1-based position of `node`, with the column counted in characters.
    pub fn position_of(&self, node: &tree_sitter::Node) -> Position {
        let point = node.start_position();
        let start = node.start_byte();
        let line_start = start.saturating_sub(point.column);
        let column = self
            .source
            .get(line_start..start)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(point.column);

        Position::new(point.row as u32 + 1, column as u32 + 1)
    }

    /// The first syntax error of the tree in document order, if any.
    pub fn first_error(&self) -> Option<ParseFailure> {
        let node = find_error(self.root_node())?;

        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let text = self.node_text(&node);
            let snippet: String = text
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .chars()
                .take(SNIPPET_LEN)
                .collect();
            if snippet.is_empty() {
                "syntax error".to_string()
            } else {
                format!("unexpected `{}`", snippet)
            }
        };

        Some(ParseFailure {
            message,
            position: self.position_of(&node),
        })
    }

    /// Fails when the tree contains error or missing nodes.
    pub fn check(&self) -> std::result::Result<(), ParseFailure> {
        match self.first_error() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

fn find_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_error(child) {
            return Some(found);
        }
    }
    None
}
