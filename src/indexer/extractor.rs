use crate::indexer::classifier::{classify, classify_parameter};
use crate::indexer::lower::lower;
use crate::indexer::parser::ParsedFile;
use crate::indexer::syntax::{ClassDef, Modifier, Name, SourceFile, Stat};
use crate::tags::Tag;

/// Walks a lowered source file and produces its tags.
///
/// The only state carried through the recursion is the enclosing scope: the
/// name a member can be statically reached through. Objects replace it with
/// their own name, traits and classes clear it, packages never set it.
pub struct TagExtractor;

impl TagExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Lowers and extracts in one step.
    pub fn extract_parsed(&self, parsed: &ParsedFile) -> Vec<Tag> {
        self.extract(&lower(parsed))
    }

    pub fn extract(&self, file: &SourceFile) -> Vec<Tag> {
        let mut tags = Vec::new();
        self.top_level(&file.stats, &mut tags);
        tags
    }

    fn top_level(&self, stats: &[Stat], tags: &mut Vec<Tag>) {
        for stat in stats {
            match stat {
                Stat::Package { body } => self.top_level(body, tags),
                other => self.walk(None, other, tags),
            }
        }
    }

    fn walk(&self, scope: Option<&str>, stat: &Stat, tags: &mut Vec<Tag>) {
        match stat {
            Stat::Def(member) | Stat::Type(member) => {
                member_tags(scope, &member.name, &member.modifiers, tags);
            }
            Stat::Val(binding) => {
                for pattern in &binding.patterns {
                    for name in pattern.bound_names() {
                        member_tags(scope, name, &binding.modifiers, tags);
                    }
                }
            }
            Stat::Object(template) | Stat::PackageObject(template) => {
                member_tags(scope, &template.name, &template.modifiers, tags);
                for child in &template.body {
                    self.walk(Some(&template.name.value), child, tags);
                }
            }
            Stat::Trait(template) => {
                member_tags(scope, &template.name, &template.modifiers, tags);
                for child in &template.body {
                    self.walk(None, child, tags);
                }
            }
            Stat::Class(class) => {
                member_tags(scope, &class.name, &class.modifiers, tags);
                constructor_tags(class, tags);
                for child in &class.body {
                    self.walk(None, child, tags);
                }
            }
            Stat::Package { .. } | Stat::Other => {}
        }
    }
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// One unqualified tag, plus a qualified twin when a scope is active.
fn member_tags(scope: Option<&str>, name: &Name, modifiers: &[Modifier], tags: &mut Vec<Tag>) {
    let tag = Tag::new(name.value.clone(), classify(scope, modifiers), name.position);
    if let Some(scope) = scope {
        tags.push(tag.qualified(scope));
    }
    tags.push(tag);
}

/// Constructor parameters are tagged unqualified only.
fn constructor_tags(class: &ClassDef, tags: &mut Vec<Tag>) {
    let mut groups = class.param_groups.iter();

    if let Some(first) = groups.next() {
        for param in first {
            let file_local = if class.is_implicit() {
                true
            } else if class.is_case {
                classify(None, &param.modifiers)
            } else {
                classify_parameter(&param.modifiers)
            };
            tags.push(Tag::new(param.name.value.clone(), file_local, param.name.position));
        }
    }

    for param in groups.flatten() {
        tags.push(Tag::new(
            param.name.value.clone(),
            classify_parameter(&param.modifiers),
            param.name.position,
        ));
    }
}
