pub mod batch;
pub mod classifier;
pub mod extractor;
pub mod lower;
pub mod parser;
pub mod syntax;
pub mod walker;

pub use batch::{BatchResult, IndexOptions, TagIndexer};
pub use classifier::classify;
pub use extractor::TagExtractor;
pub use lower::lower;
pub use parser::{ParsedFile, Parser};
pub use syntax::{Modifier, Pattern, SourceFile, Stat};
pub use walker::{FileWalker, WalkResult};
