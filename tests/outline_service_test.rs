//! Tests for OutlineService: file and reader input

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use tempfile::TempDir;

use crumbs::application::OutlineService;
use crumbs::config::Settings;
use crumbs::tree_traits::TreeNodeConvert;
use crumbs::util::testing::init_test_setup;

const OUTLINE: &str = "\
Project
  [[rocket]] Launch
    Build
    Test
  Docs
";

fn service(images_path: &str, images_suffix: &str) -> OutlineService {
    init_test_setup();
    OutlineService::new(Settings {
        images_path: PathBuf::from(images_path),
        images_suffix: images_suffix.to_string(),
    })
}

#[test]
fn given_outline_file_when_parsing_then_builds_tree() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("plan.txt");
    fs::write(&path, OUTLINE).unwrap();

    // Act
    let tree = service("/icons", "png").parse_file(&path).unwrap();

    // Assert
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.leaf_nodes(), vec!["Build", "Test", "Docs"]);
    let (_, launch) = tree.children_of(tree.root()).next().unwrap();
    assert_eq!(launch.icon(), Some("/icons/rocket.png"));
    assert_eq!(launch.text(), " Launch");
}

#[test]
fn given_reader_and_file_with_same_content_when_parsing_then_same_shape() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("plan.txt");
    fs::write(&path, OUTLINE).unwrap();
    let svc = service("", "");

    let from_file = svc.parse_file(&path).unwrap();
    let from_reader = svc.parse_reader(Cursor::new(OUTLINE)).unwrap();

    assert_eq!(
        from_file.to_tree_string().to_string(),
        from_reader.to_tree_string().to_string()
    );
}

#[test]
fn given_missing_file_when_parsing_then_errors_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.txt");

    let err = service("", "").parse_file(&path).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn given_non_utf8_file_when_parsing_then_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bin.txt");
    fs::write(&path, [0xffu8, 0xfe, b'\n']).unwrap();

    let err = service("", "").parse_file(&path).unwrap_err();

    assert!(!err.is_not_found());
    assert!(err.to_string().starts_with("read outline"));
}

#[test]
fn given_empty_input_when_parsing_then_tree_has_only_root() {
    let tree = service("", "").parse_reader(Cursor::new("")).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.depth(), 1);
}
