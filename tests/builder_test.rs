//! Tests for TreeBuilder: structure, enrichment and failure behaviour

use std::collections::{HashMap, HashSet};

use rstest::rstest;

use crumbs::domain::{
    depth, parse_lines, DomainError, IconResolver, IdError, IdGenerator, NoteTree, TreeBuilder,
    ROOT_LEVEL,
};
use crumbs::util::testing::init_test_setup;

const OUTLINE: &[&str] = &[
    "Groceries",
    "  [[cart]] Shop",
    "    Milk",
    "    Bread",
    "      Rye",
    "",
    "  Clean",
    "     Kitchen",
    "       Sink",
    "          Drain",
    "    Garage",
    " stray",
    "  [[ star ]]Relax",
];

fn outline_tree() -> NoteTree {
    init_test_setup();
    parse_lines(OUTLINE.iter().copied(), "/img", "png").expect("parse outline")
}

fn texts(tree: &NoteTree) -> Vec<String> {
    tree.iter()
        .skip(1)
        .map(|(_, e)| e.text().to_string())
        .collect()
}

// ============================================================
// Structural invariants
// ============================================================

#[test]
fn given_any_outline_when_parsing_then_root_is_sentinel() {
    let tree = outline_tree();
    let root = tree.root_entry();
    assert_eq!(root.level(), ROOT_LEVEL);
    assert_eq!(root.text(), "");
    assert_eq!(root.icon(), None);
    assert!(root.parent().is_none());
}

#[test]
fn given_outline_when_parsing_then_levels_match_source_depth() {
    let tree = outline_tree();

    // texts in this outline are unique once trimmed of markers
    let by_text: HashMap<&str, usize> = OUTLINE
        .iter()
        .map(|line| {
            let text = line.trim();
            let text = text.rsplit("]]").next().unwrap_or(text).trim();
            (text, depth(line))
        })
        .collect();

    for (idx, entry) in tree.iter().skip(1) {
        let expected = by_text[entry.text().trim()];
        assert_eq!(entry.level(), expected as i32, "level of {:?}", entry.text());
        let parent = tree.parent_of(idx).expect("non-root has parent");
        assert!(entry.level() > parent.level());
    }
}

#[test]
fn given_outline_when_parsing_then_ids_are_unique() {
    let tree = outline_tree();
    let ids: HashSet<&str> = tree.iter().map(|(_, e)| e.id()).collect();
    assert_eq!(ids.len(), tree.len());
}

#[test]
fn given_outline_when_parsing_then_preorder_follows_source_order() {
    let tree = outline_tree();
    assert_eq!(
        texts(&tree),
        vec![
            " Shop", "Milk", "Bread", "Rye", "Clean", "Kitchen", "Sink", "Drain", "Garage",
            "Relax"
        ]
    );
}

#[test]
fn given_outline_when_parsing_then_hierarchy_is_inferred() {
    let tree = outline_tree();
    let root = tree.root();
    let top: Vec<&str> = tree.children_of(root).map(|(_, e)| e.text()).collect();
    assert_eq!(top, vec![" Shop", "Clean", "Relax"]);

    let (clean, _) = tree.children_of(root).nth(1).unwrap();
    let under_clean: Vec<&str> = tree.children_of(clean).map(|(_, e)| e.text()).collect();
    assert_eq!(under_clean, vec!["Kitchen", "Garage"]);

    assert_eq!(
        tree.leaf_nodes(),
        vec!["Milk", "Rye", "Drain", "Garage", "Relax"]
    );
    assert_eq!(tree.depth(), 5);
}

#[test]
fn given_icon_markers_when_parsing_then_icons_resolved() {
    let tree = outline_tree();
    let icons: Vec<(&str, &str)> = tree
        .iter()
        .filter_map(|(_, e)| e.icon().map(|i| (e.text(), i)))
        .collect();
    assert_eq!(
        icons,
        vec![(" Shop", "/img/cart.png"), ("Relax", "/img/star.png")]
    );
}

// ============================================================
// Documented scenarios
// ============================================================

#[test]
fn given_sibling_after_grandchild_when_parsing_then_not_nested_under_it() {
    let tree = parse_lines(["  A", "    B", "  C"], "", "").unwrap();
    let root = tree.root();
    let top: Vec<_> = tree.children_of(root).collect();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].1.text(), "A");
    assert_eq!(top[1].1.text(), "C");
    assert_eq!(top[0].1.level(), 1);
    assert_eq!(top[1].1.level(), 1);

    let under_a: Vec<&str> = tree.children_of(top[0].0).map(|(_, e)| e.text()).collect();
    assert_eq!(under_a, vec!["B"]);
    assert_eq!(tree.children_of(top[1].0).count(), 0);
}

#[test]
fn given_marker_line_when_parsing_then_marker_removed_without_retrim() {
    let tree = parse_lines(["  [[cat]] Buy milk"], "/img", "png").unwrap();
    let (_, entry) = tree.children_of(tree.root()).next().unwrap();
    assert_eq!(entry.text(), " Buy milk");
    assert_eq!(entry.icon(), Some("/img/cat.png"));
}

#[test]
fn given_plain_line_when_parsing_then_text_trimmed_and_no_icon() {
    let tree = parse_lines(["  Buy milk  "], "/img", "png").unwrap();
    let (_, entry) = tree.children_of(tree.root()).next().unwrap();
    assert_eq!(entry.text(), "Buy milk");
    assert_eq!(entry.icon(), None);
}

#[rstest]
#[case(&["A", "B"])]
#[case(&[" A", " B"])]
#[case(&["", "   ", "\t\t"])]
#[case(&["\t\tTabbed"])]
fn given_only_unindented_or_blank_lines_when_parsing_then_tree_is_empty(#[case] lines: &[&str]) {
    let tree = parse_lines(lines.iter().copied(), "", "").unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_same_input_twice_when_parsing_then_same_structure_different_ids() {
    let first = outline_tree();
    let second = outline_tree();

    let shape = |tree: &NoteTree| -> Vec<(String, Option<String>, i32, usize)> {
        tree.iter()
            .map(|(_, e)| {
                (
                    e.text().to_string(),
                    e.icon().map(str::to_string),
                    e.level(),
                    e.children().len(),
                )
            })
            .collect()
    };
    assert_eq!(shape(&first), shape(&second));

    let first_ids: Vec<&str> = first.iter().map(|(_, e)| e.id()).collect();
    let second_ids: Vec<&str> = second.iter().map(|(_, e)| e.id()).collect();
    assert_ne!(first_ids, second_ids);
}

#[test]
fn given_escaping_icon_names_when_parsing_then_paths_are_cleaned_under_images_dir() {
    let tree = parse_lines(
        ["  [[/etc/passwd]] a", "  [[../up]] b", "  [[./x]] c"],
        "/img",
        "png",
    )
    .unwrap();
    let icons: Vec<&str> = tree.iter().filter_map(|(_, e)| e.icon()).collect();
    assert_eq!(icons, vec!["/img/etc/passwd.png", "/up.png", "/img/x.png"]);
}

// ============================================================
// Failure path
// ============================================================

#[test]
fn given_failed_generator_when_building_then_no_tree_is_returned() {
    let builder = TreeBuilder::new(IconResolver::new("/img", "png"));
    let mut ids = IdGenerator::new(40, crumbs::domain::id::DEFAULT_ALPHABET, 1);

    let result = builder.build(["  A", "    B"], &mut ids);

    assert_eq!(
        result.unwrap_err(),
        DomainError::IdGeneration(IdError::InvalidWorker(40))
    );
}

#[test]
fn given_failed_generator_and_empty_input_when_building_then_still_fails() {
    let builder = TreeBuilder::new(IconResolver::new("", ""));
    let mut ids = IdGenerator::new(1, "", 1);
    assert!(builder.build(Vec::<&str>::new(), &mut ids).is_err());
}
