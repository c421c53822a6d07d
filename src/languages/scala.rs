use once_cell::sync::OnceCell;
use tree_sitter::Language;

use super::LanguageGrammar;

pub struct ScalaGrammar;

static SCALA_LANGUAGE: OnceCell<Language> = OnceCell::new();

impl LanguageGrammar for ScalaGrammar {
    fn name(&self) -> &'static str {
        "scala"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["scala", "sc"]
    }

    fn language(&self) -> Language {
        SCALA_LANGUAGE
            .get_or_init(|| tree_sitter_scala::LANGUAGE.into())
            .clone()
    }
}
