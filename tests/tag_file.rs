//! End-to-end tests: walk a source tree, index it and write a tags file.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use scala_ctags::{
    FileWalker, IndexOptions, LanguageRegistry, OutputFormat, TagIndexer, TagWriter, TagsError,
    WriteOptions,
};

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn index_dir(dir: &Path, options: IndexOptions) -> scala_ctags::BatchResult {
    let walked = FileWalker::new(LanguageRegistry::new()).walk(dir);
    assert!(walked.errors.is_empty());
    let files = walked.files;
    TagIndexer::new(LanguageRegistry::new(), options).index_files(&files, || {})
}

#[test]
fn test_tags_file_is_sorted_with_header() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Zoo.scala", "object Zoo {\n  def feed(): Unit = ()\n}\n");
    write(dir.path(), "src/Animal.scala", "trait Animal {\n  def name: String\n}\n");
    write(dir.path(), "README.md", "# not scala\n");

    let batch = index_dir(dir.path(), IndexOptions::default());
    assert!(!batch.has_failures());
    assert_eq!(batch.files_indexed, 2);

    let tags_path = dir.path().join("tags");
    TagWriter::new(WriteOptions::default())
        .write_to_path(&tags_path, &batch.lines)
        .unwrap();

    let content = fs::read_to_string(&tags_path).unwrap();
    let (header, body): (Vec<&str>, Vec<&str>) =
        content.lines().partition(|l| l.starts_with("!_TAG_"));

    assert_eq!(header.len(), 4);
    assert!(header[1].starts_with("!_TAG_FILE_SORTED\t1\t"));

    let animal = dir.path().join("src/Animal.scala").display().to_string();
    let zoo = dir.path().join("src/Zoo.scala").display().to_string();
    assert_eq!(
        body,
        vec![
            format!("Animal\t{}\t1G7|;\"\tlanguage:scala", animal),
            format!("Zoo\t{}\t1G8|;\"\tlanguage:scala", zoo),
            format!("Zoo.feed\t{}\t2G7|;\"\tlanguage:scala", zoo),
            format!("feed\t{}\t2G7|;\"\tlanguage:scala", zoo),
            format!("name\t{}\t2G7|;\"\tlanguage:scala", animal),
        ]
    );
}

#[test]
fn test_failed_file_is_reported_and_others_written() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Good.scala", "object Good {\n  val ok = true\n}\n");
    write(dir.path(), "Broken.scala", "object Broken {\n  def = \n");

    let batch = index_dir(dir.path(), IndexOptions::default());

    assert_eq!(batch.files_indexed, 1);
    assert_eq!(batch.failures.len(), 1);
    match &batch.failures[0] {
        TagsError::Parse { path, failure } => {
            assert!(path.ends_with("Broken.scala"));
            assert!(failure.position.line >= 1);
        }
        other => panic!("expected parse failure, got {:?}", other),
    }

    let rendered = TagWriter::new(WriteOptions {
        header: false,
        ..WriteOptions::default()
    })
    .render(&batch.lines)
    .unwrap();
    assert_eq!(rendered.lines().count(), 3);
    assert!(rendered.lines().all(|l| !l.contains("Broken")));
}

#[test]
fn test_missing_path_does_not_drop_other_roots() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Good.scala", "object Good\n");

    let walked = FileWalker::new(LanguageRegistry::new())
        .walk_all(&[dir.path().to_path_buf(), dir.path().join("nope")]);
    assert_eq!(walked.errors.len(), 1);
    assert!(walked.errors.iter().all(|e| e.is_per_file()));

    let batch = TagIndexer::new(LanguageRegistry::new(), IndexOptions::default())
        .index_files(&walked.files, || {});
    assert_eq!(batch.files_indexed, 1);
    assert_eq!(batch.lines[0].full_name(), "Good");
}

#[test]
fn test_tolerant_mode_indexes_broken_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "Mixed.scala",
        "object Fine {\n  def ok = 1\n}\nobject Broken {\n  def = \n",
    );

    let batch = index_dir(dir.path(), IndexOptions { tolerant: true });

    assert!(!batch.has_failures());
    assert!(batch.lines.iter().any(|l| l.full_name() == "Fine.ok"));
}

#[test]
fn test_excluded_paths_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Main.scala", "object Main\n");
    write(dir.path(), "target/Generated.scala", "object Generated\n");

    let files = FileWalker::new(LanguageRegistry::new())
        .with_excludes(&["*/target/*".to_string()])
        .unwrap()
        .walk(dir.path())
        .files;

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("src/Main.scala"));
}

#[test]
fn test_json_output() {
    let lines = TagIndexer::new(LanguageRegistry::new(), IndexOptions::default())
        .index_source("object O {\n  private def f = 1\n}\n", "O.scala")
        .unwrap();

    let rendered = TagWriter::new(WriteOptions {
        format: OutputFormat::Json,
        header: true,
    })
    .render(&lines)
    .unwrap();

    let records: Vec<serde_json::Value> = rendered
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], "O");
    assert!(records[0].get("fileLocal").is_none());
    assert_eq!(records[1]["scope"], "O");
    assert_eq!(records[1]["fileLocal"], true);
    assert_eq!(records[2]["line"], 2);
}

#[test]
fn test_rewriting_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.scala", "object A {\n  val x, y = 0\n}\nclass B(val z: Int)\n");

    let writer = TagWriter::new(WriteOptions::default());
    let first = writer.render(&index_dir(dir.path(), IndexOptions::default()).lines).unwrap();
    let second = writer.render(&index_dir(dir.path(), IndexOptions::default()).lines).unwrap();

    assert_eq!(first, second);
}
