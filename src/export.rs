//! Serialization of the hierarchy to its flat text listing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::HierarchyTree;
use crate::errors::HierarchyResult;

const INDENT: &str = "  ";

/// Renders the flat listing: one line per employee in pre-order, two ASCII
/// spaces per depth level, `<role> (ID: <id>): <name>` plus newline.
///
/// On-screen display and the file export share this exact byte sequence, and
/// repeated calls without mutation produce identical output.
#[instrument(level = "debug", skip(tree))]
pub fn render(tree: &HierarchyTree) -> String {
    tree.iter()
        .map(|(_, depth, node)| format!("{}{}\n", INDENT.repeat(depth), node.data))
        .collect()
}

/// Writes the flat listing to `path`, creating or truncating the file.
#[instrument(level = "debug", skip(tree))]
pub fn write_to_file(tree: &HierarchyTree, path: &Path) -> HierarchyResult<()> {
    let mut file = File::create(path)?;
    file.write_all(render(tree).as_bytes())?;
    Ok(())
}

/// Conversion to a `termtree` rendering for the pretty `tree` view.
/// Never used for the persisted format.
pub trait ToTreeString {
    fn to_tree_string(&self) -> Tree<String>;
}

impl ToTreeString for HierarchyTree {
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let label = self
                .employee(root_idx)
                .map(|data| data.to_string())
                .unwrap_or_default();
            let mut tree = Tree::new(label);

            fn build_tree(hierarchy: &HierarchyTree, node_idx: Index, parent_tree: &mut Tree<String>) {
                if let Some(node) = hierarchy.get_node(node_idx) {
                    for &child_idx in &node.children {
                        if let Some(child) = hierarchy.get_node(child_idx) {
                            let mut child_tree = Tree::new(child.data.to_string());
                            build_tree(hierarchy, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("(no organization)".to_string())
        }
    }
}
