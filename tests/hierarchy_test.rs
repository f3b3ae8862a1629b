//! Tests for the core hierarchy operations

use orgtree::{HierarchyError, HierarchyTree};
use rstest::{fixture, rstest};

/// Root 1 Alice/CEO, 2 Bob/VP under 1, 3 Carol/Eng under 2.
#[fixture]
fn company() -> HierarchyTree {
    let mut tree = HierarchyTree::new();
    tree.create(1, "Alice", "CEO");
    tree.add_employee(1, 2, "Bob", "VP").unwrap();
    tree.add_employee(2, 3, "Carol", "Eng").unwrap();
    tree
}

// ============================================================
// Creation Tests
// ============================================================

#[rstest]
fn given_valid_parents_when_adding_then_every_employee_is_found_once(mut company: HierarchyTree) {
    company.add_employee(1, 4, "Dave", "VP").unwrap();
    company.add_employee(3, 5, "Erin", "Eng").unwrap();

    for id in 1..=5 {
        let matches: Vec<_> = company
            .iter()
            .filter(|(_, _, node)| node.data.id == id)
            .collect();
        assert_eq!(matches.len(), 1, "id {} should appear exactly once", id);
        assert!(company.find_by_id(id).is_some());
    }
}

#[rstest]
fn given_missing_parent_when_adding_then_not_found(mut company: HierarchyTree) {
    let result = company.add_employee(99, 4, "Dave", "VP");
    assert!(matches!(result, Err(HierarchyError::NotFound(99))));
    assert!(company.find_by_id(4).is_none());
}

#[rstest]
fn given_taken_id_when_adding_then_duplicate_id(mut company: HierarchyTree) {
    let result = company.add_employee(1, 2, "Impostor", "VP");
    assert!(matches!(result, Err(HierarchyError::DuplicateId(2))));
    // The original holder is untouched
    let bob = company.find_by_id(2).unwrap();
    assert_eq!(company.employee(bob).unwrap().name, "Bob");
}

#[test]
fn given_existing_tree_when_creating_then_tree_is_replaced() {
    let mut tree = HierarchyTree::new();
    tree.create(1, "Alice", "CEO");
    tree.add_employee(1, 2, "Bob", "VP").unwrap();

    tree.create(7, "Grace", "CTO");

    assert_eq!(tree.len(), 1);
    assert!(tree.find_by_id(1).is_none());
    assert!(tree.find_by_id(2).is_none());
    assert_eq!(tree.employee(tree.root().unwrap()).unwrap().name, "Grace");
}

// ============================================================
// Lookup Tests
// ============================================================

#[rstest]
fn given_company_when_searching_by_id_then_returns_record(company: HierarchyTree) {
    let carol = company.find_by_id(3).unwrap();
    let data = company.employee(carol).unwrap();
    assert_eq!(data.name, "Carol");
    assert_eq!(data.role, "Eng");
}

#[rstest]
fn given_company_when_searching_by_role_then_returns_matches_in_preorder(
    mut company: HierarchyTree,
) {
    company.add_employee(1, 4, "Dave", "VP").unwrap();

    let vps: Vec<&str> = company
        .find_all_by_role("VP")
        .into_iter()
        .map(|idx| company.employee(idx).unwrap().name.as_str())
        .collect();

    // Bob sits under the first child branch, Dave under the second
    assert_eq!(vps, vec!["Bob", "Dave"]);
}

#[rstest]
fn given_role_query_when_case_differs_then_no_match(company: HierarchyTree) {
    assert!(company.find_all_by_role("vp").is_empty());
    assert!(company.find_all_by_role("VP ").is_empty());
    assert_eq!(company.find_all_by_role("VP").len(), 1);
}

#[rstest]
fn given_unknown_role_when_searching_then_empty_not_error(company: HierarchyTree) {
    assert!(company.find_all_by_role("Intern").is_empty());
}

// ============================================================
// Update / Promote / Demote Tests
// ============================================================

#[rstest]
fn given_both_fields_empty_when_updating_then_noop_success(mut company: HierarchyTree) {
    company.update(2, Some(""), Some("")).unwrap();
    company.update(2, None, None).unwrap();

    let bob = company.find_by_id(2).unwrap();
    let data = company.employee(bob).unwrap();
    assert_eq!(data.name, "Bob");
    assert_eq!(data.role, "VP");
}

#[rstest]
fn given_partial_update_when_applying_then_other_field_kept(mut company: HierarchyTree) {
    company.update(2, Some("Robert"), None).unwrap();
    company.update(3, None, Some("Staff Eng")).unwrap();

    let bob = company.employee(company.find_by_id(2).unwrap()).unwrap();
    assert_eq!(bob.name, "Robert");
    assert_eq!(bob.role, "VP");

    let carol = company.employee(company.find_by_id(3).unwrap()).unwrap();
    assert_eq!(carol.name, "Carol");
    assert_eq!(carol.role, "Staff Eng");
}

#[rstest]
fn given_missing_id_when_updating_then_not_found(mut company: HierarchyTree) {
    let result = company.update(99, Some("Nobody"), None);
    assert!(matches!(result, Err(HierarchyError::NotFound(99))));
}

#[rstest]
fn given_empty_role_when_promoting_then_invalid_argument_and_unchanged(
    mut company: HierarchyTree,
) {
    let promote = company.promote(2, "");
    let demote = company.demote(2, "");

    assert!(matches!(promote, Err(HierarchyError::InvalidArgument(_))));
    assert!(matches!(demote, Err(HierarchyError::InvalidArgument(_))));
    let bob = company.employee(company.find_by_id(2).unwrap()).unwrap();
    assert_eq!(bob.role, "VP");
}

// promote and demote are deliberately the same operation; the menu surface
// is the only place that distinguishes them.
#[rstest]
fn given_same_inputs_when_promoting_and_demoting_then_identical_behavior(
    mut company: HierarchyTree,
) {
    company.promote(2, "SVP").unwrap();
    let after_promote = company.employee(company.find_by_id(2).unwrap()).unwrap().clone();

    company.demote(2, "SVP").unwrap();
    let after_demote = company.employee(company.find_by_id(2).unwrap()).unwrap().clone();

    assert_eq!(after_promote, after_demote);
    assert!(matches!(
        company.promote(99, "X"),
        Err(HierarchyError::NotFound(99))
    ));
    assert!(matches!(
        company.demote(99, "X"),
        Err(HierarchyError::NotFound(99))
    ));
}

// ============================================================
// Deletion Tests
// ============================================================

#[rstest]
fn given_subtree_when_deleting_then_all_descendants_removed(mut company: HierarchyTree) {
    let removed = company.delete_subtree(2).unwrap();

    assert_eq!(removed, 2, "Bob and Carol");
    assert!(company.find_by_id(2).is_none());
    assert!(company.find_by_id(3).is_none());
    let alice = company.employee(company.find_by_id(1).unwrap()).unwrap();
    assert_eq!(alice.name, "Alice");
    assert_eq!(company.len(), 1);
}

#[rstest]
fn given_root_id_when_deleting_then_not_found(mut company: HierarchyTree) {
    // Replacing the root is create's job; delete never matches it.
    let result = company.delete_subtree(1);
    assert!(matches!(result, Err(HierarchyError::NotFound(1))));
    assert_eq!(company.len(), 3);
}

#[rstest]
fn given_leaf_when_deleting_then_siblings_unaffected(mut company: HierarchyTree) {
    company.add_employee(2, 4, "Dave", "Eng").unwrap();

    company.delete_subtree(3).unwrap();

    assert!(company.find_by_id(3).is_none());
    assert!(company.find_by_id(4).is_some());
    assert_eq!(company.len(), 3);
}

// ============================================================
// Empty Tree Tests
// ============================================================

#[test]
fn given_empty_tree_when_mutating_then_empty_tree_errors_without_crash() {
    let mut tree = HierarchyTree::new();

    assert!(matches!(
        tree.add_employee(1, 2, "Bob", "VP"),
        Err(HierarchyError::EmptyTree)
    ));
    assert!(matches!(
        tree.update(1, Some("X"), None),
        Err(HierarchyError::EmptyTree)
    ));
    assert!(matches!(
        tree.promote(1, "VP"),
        Err(HierarchyError::EmptyTree)
    ));
    assert!(matches!(
        tree.demote(1, "VP"),
        Err(HierarchyError::EmptyTree)
    ));
    assert!(matches!(
        tree.delete_subtree(1),
        Err(HierarchyError::EmptyTree)
    ));
}

#[test]
fn given_empty_tree_when_querying_then_empty_results() {
    let tree = HierarchyTree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.depth(), 0);
    assert!(tree.find_by_id(1).is_none());
    assert!(tree.find_all_by_role("CEO").is_empty());
    assert_eq!(tree.iter().count(), 0);
}

// ============================================================
// Depth Tests
// ============================================================

#[rstest]
fn given_company_when_measuring_then_depth_counts_levels(company: HierarchyTree) {
    assert_eq!(company.depth(), 3);
}
