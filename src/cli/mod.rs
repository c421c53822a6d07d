mod commands;

pub use commands::{generate_tags, Cli};
