use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::errors::{HierarchyError, HierarchyResult};

/// Employee record stored at each tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeData {
    /// Numeric identifier, unique across the tree
    pub id: u32,
    pub name: String,
    /// Free-text role label, matched case-sensitively
    pub role: String,
}

impl EmployeeData {
    pub fn new(id: u32, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }
}

impl fmt::Display for EmployeeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {}): {}", self.role, self.id, self.name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Employee record for this node
    pub data: EmployeeData,
    /// Index of the supervising node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of direct reports, insertion order preserved
    pub children: Vec<Index>,
}

/// Arena-based tree of employee records.
///
/// Uses generational arena for memory-safe node references: an `Index` held
/// across a structural mutation resolves to `None` instead of dangling.
/// At most one root exists; `root == None` means "no organization".
#[derive(Debug)]
pub struct HierarchyTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for the empty tree
    root: Option<Index>,
}

impl Default for HierarchyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Replaces any existing tree with a fresh single-node root.
    ///
    /// The previous arena is dropped wholesale, releasing every old node
    /// before the new root is installed.
    #[instrument(level = "debug", skip(self, name, role))]
    pub fn create(&mut self, id: u32, name: &str, role: &str) -> Index {
        self.arena = Arena::new();
        self.root = None;
        self.insert_node(EmployeeData::new(id, name, role), None)
    }

    /// Inserts a node without id checks. Callers are responsible for keeping
    /// ids unique; the public mutation API enforces it.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: EmployeeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                parent_node.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Appends a new leaf under the employee with `parent_id`.
    ///
    /// Fails with `EmptyTree` when no organization exists, `NotFound` when the
    /// supervisor id is absent, `DuplicateId` when `id` is already taken.
    #[instrument(level = "debug", skip(self, name, role))]
    pub fn add_employee(
        &mut self,
        parent_id: u32,
        id: u32,
        name: &str,
        role: &str,
    ) -> HierarchyResult<Index> {
        if self.root.is_none() {
            return Err(HierarchyError::EmptyTree);
        }
        if self.find_by_id(id).is_some() {
            return Err(HierarchyError::DuplicateId(id));
        }
        let parent_idx = self
            .find_by_id(parent_id)
            .ok_or(HierarchyError::NotFound(parent_id))?;
        Ok(self.insert_node(EmployeeData::new(id, name, role), Some(parent_idx)))
    }

    /// Pre-order search by id; the first match encountered wins.
    ///
    /// Ids are unique through the public API, so the tie-break only matters
    /// for trees built through unchecked insertion.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, id: u32) -> Option<Index> {
        self.iter()
            .find(|(_, _, node)| node.data.id == id)
            .map(|(idx, _, _)| idx)
    }

    /// Collects every employee whose role equals `role` exactly
    /// (case-sensitive, no trimming), in pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn find_all_by_role(&self, role: &str) -> Vec<Index> {
        self.iter()
            .filter(|(_, _, node)| node.data.role == role)
            .map(|(idx, _, _)| idx)
            .collect()
    }

    /// Partial update of name and/or role.
    ///
    /// A field is applied only when provided and non-empty; both fields empty
    /// is a success no-op as long as the id exists.
    #[instrument(level = "debug", skip(self, new_name, new_role))]
    pub fn update(
        &mut self,
        id: u32,
        new_name: Option<&str>,
        new_role: Option<&str>,
    ) -> HierarchyResult<()> {
        if self.root.is_none() {
            return Err(HierarchyError::EmptyTree);
        }
        let idx = self.find_by_id(id).ok_or(HierarchyError::NotFound(id))?;
        if let Some(node) = self.arena.get_mut(idx) {
            if let Some(name) = new_name.filter(|s| !s.is_empty()) {
                node.data.name = name.to_string();
            }
            if let Some(role) = new_role.filter(|s| !s.is_empty()) {
                node.data.role = role.to_string();
            }
        }
        Ok(())
    }

    /// Assigns a new role. Behaviorally identical to `demote`; the two names
    /// exist because the menu surface distinguishes them.
    #[instrument(level = "debug", skip(self, new_role))]
    pub fn promote(&mut self, id: u32, new_role: &str) -> HierarchyResult<()> {
        self.reassign_role(id, new_role)
    }

    /// Assigns a new role. Behaviorally identical to `promote`.
    #[instrument(level = "debug", skip(self, new_role))]
    pub fn demote(&mut self, id: u32, new_role: &str) -> HierarchyResult<()> {
        self.reassign_role(id, new_role)
    }

    fn reassign_role(&mut self, id: u32, new_role: &str) -> HierarchyResult<()> {
        if new_role.is_empty() {
            return Err(HierarchyError::InvalidArgument(
                "new role must not be empty".to_string(),
            ));
        }
        if self.root.is_none() {
            return Err(HierarchyError::EmptyTree);
        }
        let idx = self.find_by_id(id).ok_or(HierarchyError::NotFound(id))?;
        if let Some(node) = self.arena.get_mut(idx) {
            node.data.role = new_role.to_string();
        }
        Ok(())
    }

    /// Removes the employee with `id` and its entire subtree, returning the
    /// number of employees released.
    ///
    /// The root is never matched: replacing the whole organization is
    /// `create`'s job, so `delete_subtree(root_id)` is `NotFound`. Sibling
    /// order of the remaining children is unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_subtree(&mut self, id: u32) -> HierarchyResult<usize> {
        let root = self.root.ok_or(HierarchyError::EmptyTree)?;
        let target = self.find_by_id(id).ok_or(HierarchyError::NotFound(id))?;
        if target == root {
            return Err(HierarchyError::NotFound(id));
        }

        let parent_idx = self
            .arena
            .get(target)
            .and_then(|node| node.parent)
            .ok_or(HierarchyError::NotFound(id))?;
        if let Some(parent_node) = self.arena.get_mut(parent_idx) {
            parent_node.children.retain(|&child| child != target);
        }

        let mut removed = 0;
        let mut stack = vec![target];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.remove(idx) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Copy-free read of the employee record behind an index.
    pub fn employee(&self, idx: Index) -> Option<&EmployeeData> {
        self.arena.get(idx).map(|node| &node.data)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of employees in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Lazy pre-order traversal yielding `(index, depth, node)`, depth 0 at
    /// the root, children visited in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a HierarchyTree,
    stack: Vec<(Index, usize)>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a HierarchyTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, 0));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current_idx, depth, node));
            }
        }
        None
    }
}
