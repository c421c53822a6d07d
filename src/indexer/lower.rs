//! Lowers a tree-sitter Scala tree into the declaration model of [`crate::indexer::syntax`].
//!
//! Node kinds the tagger does not understand become [`Stat::Other`] or
//! [`Pattern::Other`]; lowering never fails.

use tree_sitter::Node;

use crate::indexer::parser::ParsedFile;
use crate::indexer::syntax::{
    Binding, ClassDef, Member, Modifier, Name, Param, Pattern, SourceFile, Stat, Template,
};

pub fn lower(parsed: &ParsedFile) -> SourceFile {
    let lowerer = Lowerer { parsed };
    SourceFile {
        stats: lowerer.stats(parsed.root_node()),
    }
}

struct Lowerer<'a> {
    parsed: &'a ParsedFile,
}

impl<'a> Lowerer<'a> {
    fn stats(&self, container: Node) -> Vec<Stat> {
        let mut cursor = container.walk();
        container
            .named_children(&mut cursor)
            .map(|node| self.stat(node))
            .filter(|stat| *stat != Stat::Other)
            .collect()
    }

    fn stat(&self, node: Node) -> Stat {
        let lowered = match node.kind() {
            "package_clause" => Some(Stat::Package {
                body: self.body(node),
            }),
            "package_object" => self.template(node).map(Stat::PackageObject),
            "object_definition" => self.template(node).map(Stat::Object),
            "trait_definition" => self.template(node).map(Stat::Trait),
            "class_definition" => self.class(node).map(Stat::Class),
            "function_definition" | "function_declaration" => self.member(node).map(Stat::Def),
            "type_definition" => self.member(node).map(Stat::Type),
            "val_definition" | "var_definition" => Some(Stat::Val(self.binding(node))),
            "val_declaration" | "var_declaration" => Some(Stat::Val(self.declaration(node))),
            _ => None,
        };
        lowered.unwrap_or(Stat::Other)
    }

    fn name(&self, node: Node) -> Option<Name> {
        let name = node.child_by_field_name("name")?;
        Some(self.name_of(name))
    }

    fn name_of(&self, node: Node) -> Name {
        Name::new(
            strip_backticks(self.parsed.node_text(&node)),
            self.parsed.position_of(&node),
        )
    }

    fn body(&self, node: Node) -> Vec<Stat> {
        let body = node.child_by_field_name("body").or_else(|| {
            let mut cursor = node.walk();
            let found = node
                .named_children(&mut cursor)
                .find(|child| child.kind() == "template_body");
            found
        });
        body.map(|b| self.stats(b)).unwrap_or_default()
    }

    fn member(&self, node: Node) -> Option<Member> {
        Some(Member {
            name: self.name(node)?,
            modifiers: self.modifiers(node),
        })
    }

    fn template(&self, node: Node) -> Option<Template> {
        Some(Template {
            name: self.name(node)?,
            modifiers: self.modifiers(node),
            body: self.body(node),
        })
    }

    fn class(&self, node: Node) -> Option<ClassDef> {
        let name = self.name(node)?;

        let mut is_case = false;
        let mut param_groups = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "case" => is_case = true,
                "class_parameters" => param_groups.push(self.params(child)),
                _ => {}
            }
        }

        Some(ClassDef {
            name,
            modifiers: self.modifiers(node),
            is_case,
            param_groups,
            body: self.body(node),
        })
    }

    fn params(&self, group: Node) -> Vec<Param> {
        let mut group_modifier = None;
        let mut params = Vec::new();

        let mut cursor = group.walk();
        for child in group.children(&mut cursor) {
            match child.kind() {
                "implicit" => group_modifier = Some(Modifier::Implicit),
                "using" => group_modifier = Some(Modifier::Using),
                "class_parameter" => {
                    if let Some(name) = self.name(child) {
                        params.push(Param {
                            name,
                            modifiers: self.param_modifiers(child),
                        });
                    }
                }
                _ => {}
            }
        }

        if let Some(modifier) = group_modifier {
            for param in &mut params {
                param.modifiers.push(modifier.clone());
            }
        }
        params
    }

    fn param_modifiers(&self, node: Node) -> Vec<Modifier> {
        let mut modifiers = self.modifiers(node);
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "val" => modifiers.push(Modifier::ValParam),
                "var" => modifiers.push(Modifier::VarParam),
                _ => {}
            }
        }
        modifiers
    }

    fn modifiers(&self, node: Node) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "modifiers" => {
                    let mut inner = child.walk();
                    modifiers.extend(child.children(&mut inner).map(|m| self.modifier(m)));
                }
                "access_modifier" => modifiers.push(self.modifier(child)),
                _ => {}
            }
        }
        modifiers
    }

    fn modifier(&self, node: Node) -> Modifier {
        match node.kind() {
            "access_modifier" => access_modifier(self.parsed.node_text(&node)),
            "abstract" => Modifier::Abstract,
            "final" => Modifier::Final,
            "sealed" => Modifier::Sealed,
            "implicit" => Modifier::Implicit,
            "lazy" => Modifier::Lazy,
            "override" => Modifier::Override,
            other => Modifier::Other(other.to_string()),
        }
    }

    fn binding(&self, node: Node) -> Binding {
        let mut patterns = Vec::new();
        let mut cursor = node.walk();
        for pattern in node.children_by_field_name("pattern", &mut cursor) {
            if pattern.kind() == "identifiers" {
                let mut inner = pattern.walk();
                patterns.extend(
                    pattern
                        .named_children(&mut inner)
                        .filter(|n| n.kind() == "identifier")
                        .map(|n| Pattern::Var(self.name_of(n))),
                );
            } else {
                patterns.push(self.pattern(pattern, true));
            }
        }

        Binding {
            modifiers: self.modifiers(node),
            patterns,
        }
    }

    fn declaration(&self, node: Node) -> Binding {
        let mut cursor = node.walk();
        let patterns = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| Pattern::Var(self.name_of(n)))
            .collect();

        Binding {
            modifiers: self.modifiers(node),
            patterns,
        }
    }

    /// `top` is true for the outermost pattern of a `val`, where any
    /// identifier binds. Nested capitalised or backquoted identifiers refer
    /// to existing stable values instead.
    fn pattern(&self, node: Node, top: bool) -> Pattern {
        match node.kind() {
            "identifier" => {
                let text = self.parsed.node_text(&node);
                if top || is_variable_name(text) {
                    Pattern::Var(self.name_of(node))
                } else {
                    Pattern::Other
                }
            }
            "typed_pattern" => match self.field_or_first(node, "pattern") {
                Some(inner) => Pattern::Typed(Box::new(self.pattern(inner, top))),
                None => Pattern::Other,
            },
            "parenthesized_pattern" => match node.named_child(0) {
                Some(inner) => self.pattern(inner, top),
                None => Pattern::Other,
            },
            "tuple_pattern" => {
                let mut cursor = node.walk();
                let items = node
                    .named_children(&mut cursor)
                    .map(|item| self.pattern(item, false))
                    .collect();
                Pattern::Tuple(items)
            }
            "infix_pattern" => {
                let lhs = node
                    .child_by_field_name("left")
                    .map(|n| self.pattern(n, false))
                    .unwrap_or(Pattern::Other);
                let args = node
                    .child_by_field_name("right")
                    .map(|n| vec![self.pattern(n, false)])
                    .unwrap_or_default();
                Pattern::ExtractInfix {
                    lhs: Box::new(lhs),
                    args,
                }
            }
            "case_class_pattern" => {
                let mut cursor = node.walk();
                let mut args: Vec<Pattern> = node
                    .children_by_field_name("pattern", &mut cursor)
                    .map(|arg| self.pattern(arg, false))
                    .collect();
                if args.is_empty() {
                    // skip the extractor's type name
                    args = node
                        .named_children(&mut cursor)
                        .skip(1)
                        .map(|arg| self.pattern(arg, false))
                        .collect();
                }
                Pattern::Extract(args)
            }
            "capture_pattern" => {
                let name = node.child_by_field_name("name");
                let inner = node.child_by_field_name("pattern");
                match name {
                    Some(name) => Pattern::Bind {
                        name: self.name_of(name),
                        pattern: Box::new(
                            inner
                                .map(|n| self.pattern(n, false))
                                .unwrap_or(Pattern::Other),
                        ),
                    },
                    None => Pattern::Other,
                }
            }
            _ => Pattern::Other,
        }
    }

    fn field_or_first<'t>(&self, node: Node<'t>, field: &str) -> Option<Node<'t>> {
        node.child_by_field_name(field).or_else(|| node.named_child(0))
    }
}

fn strip_backticks(text: &str) -> &str {
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .unwrap_or(text)
}

fn is_variable_name(text: &str) -> bool {
    text.chars()
        .next()
        .map(|c| c == '_' || c.is_lowercase())
        .unwrap_or(false)
}

/// Parses `private`, `protected[pkg]`, `private[this]`.
fn access_modifier(text: &str) -> Modifier {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (keyword, qualifier) = match compact.split_once('[') {
        Some((keyword, rest)) => (
            keyword.to_string(),
            Some(strip_backticks(rest.trim_end_matches(']')).to_string()),
        ),
        None => (compact.clone(), None),
    };

    match keyword.as_str() {
        "private" => Modifier::Private(qualifier),
        "protected" => Modifier::Protected(qualifier),
        _ => Modifier::Other(keyword),
    }
}
