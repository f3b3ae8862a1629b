//! Tests for the hierarchy listing loader

use std::fs;

use orgtree::export::render;
use orgtree::{HierarchyError, HierarchyParser, HierarchyTree};

fn parse(content: &str) -> Result<HierarchyTree, HierarchyError> {
    HierarchyParser::new().parse_str(content)
}

// ============================================================
// Round-Trip Tests
// ============================================================

#[test]
fn given_company_when_round_tripping_then_structure_is_reconstructed() {
    let mut tree = HierarchyTree::new();
    tree.create(1, "Alice", "CEO");
    tree.add_employee(1, 2, "Bob", "VP").unwrap();
    tree.add_employee(2, 3, "Carol", "Eng").unwrap();
    tree.add_employee(1, 4, "Dave", "VP").unwrap();

    let reloaded = parse(&render(&tree)).unwrap();

    // Same parent/child id relations: re-rendering gives identical bytes
    assert_eq!(render(&reloaded), render(&tree));
    assert_eq!(reloaded.len(), 4);

    // Carol still hangs under Bob
    let carol = reloaded.find_by_id(3).unwrap();
    let parent = reloaded.get_node(carol).unwrap().parent.unwrap();
    assert_eq!(reloaded.employee(parent).unwrap().id, 2);
}

#[test]
fn given_empty_input_when_parsing_then_empty_tree() {
    let tree = parse("").unwrap();
    assert!(tree.is_empty());
    assert_eq!(render(&tree), "");
}

#[test]
fn given_role_containing_separator_when_round_tripping_then_role_survives() {
    let mut tree = HierarchyTree::new();
    // Pathological role that embeds the line separator itself
    tree.create(5, "Bob", "Mgr (ID: 9): x");

    let reloaded = parse(&render(&tree)).unwrap();

    let root = reloaded.root().unwrap();
    let data = reloaded.employee(root).unwrap();
    assert_eq!(data.id, 5);
    assert_eq!(data.name, "Bob");
    assert_eq!(data.role, "Mgr (ID: 9): x");
}

// ============================================================
// Malformed Input Tests
// ============================================================

#[test]
fn given_garbage_line_when_parsing_then_parse_failure_with_line_number() {
    let result = parse("CEO (ID: 1): Alice\n  this is not an employee\n");
    match result {
        Err(HierarchyError::ParseFailure { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected ParseFailure, got {:?}", other),
    }
}

#[test]
fn given_odd_indentation_when_parsing_then_parse_failure() {
    let result = parse("CEO (ID: 1): Alice\n VP (ID: 2): Bob\n");
    assert!(matches!(
        result,
        Err(HierarchyError::ParseFailure { line: 2, .. })
    ));
}

#[test]
fn given_depth_jump_when_parsing_then_parse_failure() {
    let result = parse("CEO (ID: 1): Alice\n    Eng (ID: 3): Carol\n");
    assert!(matches!(
        result,
        Err(HierarchyError::ParseFailure { line: 2, .. })
    ));
}

#[test]
fn given_indented_first_line_when_parsing_then_parse_failure() {
    let result = parse("  VP (ID: 2): Bob\n");
    assert!(matches!(
        result,
        Err(HierarchyError::ParseFailure { line: 1, .. })
    ));
}

#[test]
fn given_second_root_when_parsing_then_parse_failure() {
    let result = parse("CEO (ID: 1): Alice\nCEO (ID: 2): Zed\n");
    assert!(matches!(
        result,
        Err(HierarchyError::ParseFailure { line: 2, .. })
    ));
}

#[test]
fn given_duplicate_id_when_parsing_then_parse_failure() {
    let result = parse("CEO (ID: 1): Alice\n  VP (ID: 1): Bob\n");
    match result {
        Err(HierarchyError::ParseFailure { line, reason }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("duplicate"), "reason: {}", reason);
        }
        other => panic!("expected ParseFailure, got {:?}", other),
    }
}

#[test]
fn given_oversized_id_when_parsing_then_parse_failure() {
    let result = parse("CEO (ID: 99999999999): Alice\n");
    assert!(matches!(
        result,
        Err(HierarchyError::ParseFailure { line: 1, .. })
    ));
}

// ============================================================
// File Loading Tests
// ============================================================

#[test]
fn given_listing_file_when_loading_then_tree_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("org.txt");
    fs::write(&path, "CEO (ID: 1): Alice\n  VP (ID: 2): Bob\n").unwrap();

    let tree = HierarchyParser::new().load_from_file(&path).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.depth(), 2);
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = HierarchyParser::new().load_from_file(&dir.path().join("absent.txt"));
    assert!(matches!(result, Err(HierarchyError::Io(_))));
}

#[test]
fn given_parser_reuse_when_parsing_twice_then_id_state_resets() {
    let mut parser = HierarchyParser::new();
    let content = "CEO (ID: 1): Alice\n";

    parser.parse_str(content).unwrap();
    // Ids seen in the first run must not poison the second
    let tree = parser.parse_str(content).unwrap();

    assert_eq!(tree.len(), 1);
}
