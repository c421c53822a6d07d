//! Declaration-level view of a Scala source file.
//!
//! Only the shapes that matter for tagging are modelled. Everything else
//! collapses into [`Stat::Other`] and contributes nothing.

use crate::tags::Position;

/// An identifier together with the position of its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub value: String,
    pub position: Position,
}

impl Name {
    pub fn new(value: impl Into<String>, position: Position) -> Self {
        Self {
            value: value.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// `private`, `private[X]`; `private[this]` carries `Some("this")`
    Private(Option<String>),
    Protected(Option<String>),
    /// `val` on a constructor parameter
    ValParam,
    /// `var` on a constructor parameter
    VarParam,
    Implicit,
    Using,
    Abstract,
    Final,
    Sealed,
    Override,
    Lazy,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A simple bound name
    Var(Name),
    Typed(Box<Pattern>),
    Tuple(Vec<Pattern>),
    /// `lhs op rhs`, e.g. `head :: tail`
    ExtractInfix { lhs: Box<Pattern>, args: Vec<Pattern> },
    /// `Some(x)`
    Extract(Vec<Pattern>),
    /// `name @ pattern`
    Bind { name: Name, pattern: Box<Pattern> },
    /// Literals, wildcards, stable identifiers and anything unrecognised
    Other,
}

impl Pattern {
    /// Every name bound by this pattern, left to right.
    pub fn bound_names(&self) -> Vec<&Name> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Pattern::Var(name) => out.push(name),
            Pattern::Typed(inner) => inner.collect_names(out),
            Pattern::Tuple(items) | Pattern::Extract(items) => {
                for item in items {
                    item.collect_names(out);
                }
            }
            Pattern::ExtractInfix { lhs, args } => {
                lhs.collect_names(out);
                for arg in args {
                    arg.collect_names(out);
                }
            }
            Pattern::Bind { name, pattern } => {
                out.push(name);
                pattern.collect_names(out);
            }
            Pattern::Other => {}
        }
    }
}

/// A named member without a body that matters for tagging (`def`, `type`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: Name,
    pub modifiers: Vec<Modifier>,
}

/// `val` / `var` definitions and declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub modifiers: Vec<Modifier>,
    pub patterns: Vec<Pattern>,
}

/// Objects, package objects and traits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: Name,
    pub modifiers: Vec<Modifier>,
    pub body: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: Name,
    pub modifiers: Vec<Modifier>,
    pub is_case: bool,
    pub param_groups: Vec<Vec<Param>>,
    pub body: Vec<Stat>,
}

impl ClassDef {
    /// `implicit class RichX(x: X)`, the extension-method wrapper form
    pub fn is_implicit(&self) -> bool {
        self.modifiers.contains(&Modifier::Implicit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stat {
    Package { body: Vec<Stat> },
    PackageObject(Template),
    Object(Template),
    Trait(Template),
    Class(ClassDef),
    Def(Member),
    Type(Member),
    Val(Binding),
    Other,
}

/// Top-level statements of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub stats: Vec<Stat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, column: u32) -> Pattern {
        Pattern::Var(Name::new(name, Position::new(1, column)))
    }

    #[test]
    fn test_bound_names_simple() {
        let pattern = var("x", 5);
        let names = pattern.bound_names();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].value, "x");
    }

    #[test]
    fn test_bound_names_nested() {
        // (a: Int, h :: t, Some(s @ _))
        let pattern = Pattern::Tuple(vec![
            Pattern::Typed(Box::new(var("a", 6))),
            Pattern::ExtractInfix {
                lhs: Box::new(var("h", 14)),
                args: vec![var("t", 19)],
            },
            Pattern::Extract(vec![Pattern::Bind {
                name: Name::new("s", Position::new(1, 27)),
                pattern: Box::new(Pattern::Other),
            }]),
        ]);

        let names: Vec<&str> = pattern
            .bound_names()
            .iter()
            .map(|n| n.value.as_str())
            .collect();
        assert_eq!(names, vec!["a", "h", "t", "s"]);
    }

    #[test]
    fn test_bound_names_other() {
        assert!(Pattern::Other.bound_names().is_empty());
        assert!(Pattern::Tuple(vec![Pattern::Other, Pattern::Other])
            .bound_names()
            .is_empty());
    }

    #[test]
    fn test_implicit_class() {
        let class = ClassDef {
            name: Name::new("RichInt", Position::new(1, 16)),
            modifiers: vec![Modifier::Implicit],
            is_case: false,
            param_groups: vec![],
            body: vec![],
        };
        assert!(class.is_implicit());
    }
}
