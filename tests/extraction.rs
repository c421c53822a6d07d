//! Integration tests for tag extraction from Scala source.
//!
//! Each test parses real source with tree-sitter and checks the tags
//! produced, in extraction order.

use scala_ctags::{IndexOptions, LanguageRegistry, Position, TagIndexer, TagLine};

fn extract(source: &str) -> Vec<TagLine> {
    TagIndexer::new(LanguageRegistry::new(), IndexOptions::default())
        .index_source(source, "Test.scala")
        .expect("source should index cleanly")
}

fn names(lines: &[TagLine]) -> Vec<String> {
    lines.iter().map(|l| l.full_name().into_owned()).collect()
}

fn find<'a>(lines: &'a [TagLine], full_name: &str) -> &'a TagLine {
    lines
        .iter()
        .find(|l| l.full_name() == full_name)
        .unwrap_or_else(|| panic!("no tag named {}", full_name))
}

// =====================================================
// Qualification
// =====================================================

#[test]
fn test_object_member_gets_qualified_and_plain_tag() {
    let lines = extract("object O {\n  def m = 1\n}\n");

    assert_eq!(names(&lines), vec!["O", "O.m", "m"]);
    assert_eq!(find(&lines, "O.m").tag.position, Position::new(2, 7));
    assert_eq!(find(&lines, "m").tag.position, Position::new(2, 7));
}

#[test]
fn test_nested_objects_do_not_accumulate_qualifiers() {
    let lines = extract("object A {\n  object B {\n    def m = 1\n  }\n}\n");

    assert_eq!(names(&lines), vec!["A", "A.B", "B", "B.m", "m"]);
    assert!(!names(&lines).contains(&"A.B.m".to_string()));
}

#[test]
fn test_trait_and_class_bodies_are_unqualified() {
    let source = "\
object O {
  trait T {
    def t = 1
  }
  class C {
    val c = 1
  }
}
";
    let lines = extract(source);

    assert_eq!(names(&lines), vec!["O", "O.T", "T", "t", "O.C", "C", "c"]);
}

#[test]
fn test_package_contributes_no_tags() {
    let lines = extract("package com.example.app\n\nobject Main {\n  def run(): Unit = ()\n}\n");

    assert_eq!(names(&lines), vec!["Main", "Main.run", "run"]);
    assert_eq!(find(&lines, "Main").tag.position, Position::new(3, 8));
}

#[test]
fn test_multi_binding_val() {
    let lines = extract("object O {\n  val a, b = \"x\"\n}\n");

    assert_eq!(names(&lines), vec!["O", "O.a", "a", "O.b", "b"]);
    let a = find(&lines, "a").tag.position;
    let b = find(&lines, "b").tag.position;
    assert_eq!(a.line, b.line);
    assert!(b.column > a.column);
}

#[test]
fn test_destructuring_val_binds_each_variable() {
    let lines = extract("object O {\n  val (x, y) = (1, 2)\n}\n");

    assert_eq!(names(&lines), vec!["O", "O.x", "x", "O.y", "y"]);
}

// =====================================================
// Locality
// =====================================================

#[test]
fn test_member_modifiers_decide_locality() {
    let source = "\
object T {
  private def f = 1
  protected[T] def g = 2
  private[T] def h = 3
  private[U] def k = 4
  def l = 5
}
";
    let lines = extract(source);

    for (name, local) in [("f", true), ("g", false), ("h", true), ("k", false), ("l", false)] {
        assert_eq!(find(&lines, name).tag.is_file_local, local, "{}", name);
        let qualified = format!("T.{}", name);
        assert_eq!(find(&lines, &qualified).tag.is_file_local, local, "{}", qualified);
    }
}

#[test]
fn test_private_this_is_file_local() {
    let lines = extract("class C {\n  private[this] val secret = 1\n}\n");
    assert!(find(&lines, "secret").tag.is_file_local);
}

#[test]
fn test_private_definitions_are_file_local() {
    let lines = extract("private object Hidden\nprivate class Inner\nobject Visible\n");

    assert!(find(&lines, "Hidden").tag.is_file_local);
    assert!(find(&lines, "Inner").tag.is_file_local);
    assert!(!find(&lines, "Visible").tag.is_file_local);
}

#[test]
fn test_case_class_parameters_are_exported() {
    let lines = extract("case class P(x: Int, private val y: Int)\n");

    assert_eq!(names(&lines), vec!["P", "x", "y"]);
    assert!(!find(&lines, "P").tag.is_file_local);
    assert!(!find(&lines, "x").tag.is_file_local);
    assert!(find(&lines, "y").tag.is_file_local);
}

#[test]
fn test_plain_class_parameters_need_val_or_var() {
    let lines = extract("class Q(a: Int, val b: Int, var c: Int)\n");

    assert_eq!(names(&lines), vec!["Q", "a", "b", "c"]);
    assert!(find(&lines, "a").tag.is_file_local);
    assert!(!find(&lines, "b").tag.is_file_local);
    assert!(!find(&lines, "c").tag.is_file_local);
}

// =====================================================
// Rendering
// =====================================================

#[test]
fn test_rendered_line_format() {
    let lines = extract("object O {\n  private def f = 1\n}\n");

    let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "O\tTest.scala\t1G8|;\"\tlanguage:scala",
            "O.f\tTest.scala\t2G15|;\"\tfile:Test.scala\tlanguage:scala",
            "f\tTest.scala\t2G15|;\"\tfile:Test.scala\tlanguage:scala",
        ]
    );
}

#[test]
fn test_extraction_is_deterministic() {
    let source = include_str!("fixtures/Shapes.scala");

    let first: Vec<String> = extract(source).iter().map(|l| l.to_string()).collect();
    let second: Vec<String> = extract(source).iter().map(|l| l.to_string()).collect();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_fixture_tags() {
    let lines = extract(include_str!("fixtures/Shapes.scala"));
    let names = names(&lines);

    for expected in ["Shape", "area", "Circle", "radius", "Shapes", "Shapes.unit", "Shapes.Circle"] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
    assert!(find(&lines, "Shapes.cache").tag.is_file_local);
}
