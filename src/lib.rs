pub mod error;
pub mod indexer;
pub mod languages;
pub mod tags;

pub use error::{ParseFailure, Result, TagsError};
pub use indexer::{
    classify, lower, BatchResult, FileWalker, IndexOptions, Modifier, ParsedFile, Parser,
    Pattern, SourceFile, Stat, TagExtractor, TagIndexer, WalkResult,
};
pub use languages::{LanguageGrammar, LanguageRegistry};
pub use tags::{sort_tag_lines, OutputFormat, Position, Tag, TagLine, TagWriter, WriteOptions};
