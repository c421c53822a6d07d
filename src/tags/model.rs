use std::borrow::Cow;
use std::fmt;

/// 1-based line and column of a declaration's name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A named entity found in a source file, optionally reachable through a qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Enclosing scope the entity is statically reachable through
    pub qualifier: Option<String>,
    pub name: String,
    /// Whether the entity should only be searchable from its own file
    pub is_file_local: bool,
    pub position: Position,
}

impl Tag {
    /// Creates an unqualified tag
    pub fn new(name: impl Into<String>, is_file_local: bool, position: Position) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
            is_file_local,
            position,
        }
    }

    /// Returns a copy of this tag qualified by `qualifier`
    pub fn qualified(&self, qualifier: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            ..self.clone()
        }
    }

    /// `qualifier.name` for qualified tags, `name` otherwise.
    pub fn full_name(&self) -> Cow<'_, str> {
        match &self.qualifier {
            Some(q) => Cow::Owned(format!("{}.{}", q, self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }
}

/// A tag bound to the file it was found in. Rendered as one index line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLine {
    pub file: String,
    pub language: &'static str,
    pub tag: Tag,
}

impl TagLine {
    pub fn new(tag: Tag, file: impl Into<String>, language: &'static str) -> Self {
        Self {
            file: file.into(),
            language,
            tag,
        }
    }

    pub fn full_name(&self) -> Cow<'_, str> {
        self.tag.full_name()
    }
}

impl fmt::Display for TagLine {
    /// `<name>\t<file>\t<line>G<column>|;"\t[file:<file>\t]language:<lang>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}G{}|;\"\t",
            self.full_name(),
            self.file,
            self.tag.position.line,
            self.tag.position.column
        )?;
        if self.tag.is_file_local {
            write!(f, "file:{}\t", self.file)?;
        }
        write!(f, "language:{}", self.language)
    }
}

/// Sorts lines by full name. Ties keep their input order.
pub fn sort_tag_lines(lines: &mut [TagLine]) {
    lines.sort_by(|a, b| a.full_name().cmp(&b.full_name()));
}
