//! orgtree: organization hierarchy manager
//!
//! Maintains an in-memory tree of employee records (id, name, role, ordered
//! reports) and exposes operations to build, query, mutate and persist it as
//! a flat indented listing. The tree is arena-backed; handles held across a
//! structural mutation resolve to `None` instead of dangling.

pub mod arena;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod export;
pub mod parser;
pub mod util;

pub use arena::{EmployeeData, HierarchyTree, TreeNode};
pub use errors::{HierarchyError, HierarchyResult};
pub use parser::HierarchyParser;
