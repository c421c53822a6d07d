//! Tag records and their serialized index-file form.

pub mod model;
pub mod writer;

pub use model::{sort_tag_lines, Position, Tag, TagLine};
pub use writer::{OutputFormat, TagWriter, WriteOptions};
