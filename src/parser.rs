//! Loader for the flat hierarchy listing.
//!
//! Reconstructs parent/child relationships from indentation depth, inverting
//! the exporter line by line.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use generational_arena::Index;
use regex::Regex;
use tracing::instrument;

use crate::arena::{EmployeeData, HierarchyTree};
use crate::errors::{HierarchyError, HierarchyResult};

/// Parses hierarchy listings back into a [`HierarchyTree`].
pub struct HierarchyParser {
    line_regex: Regex,
    seen_ids: HashSet<u32>,
}

impl Default for HierarchyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyParser {
    pub fn new() -> Self {
        Self {
            // Greedy role group: the ` (ID: n): ` separator binds at its last
            // occurrence, so roles containing the separator survive round-trips.
            line_regex: Regex::new(r"^(.+) \(ID: (\d+)\): (.*)$").unwrap(),
            seen_ids: HashSet::new(),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load_from_file(&mut self, path: &Path) -> HierarchyResult<HierarchyTree> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Builds a tree from listing text. Empty input yields the empty tree.
    #[instrument(level = "debug", skip(self, content))]
    pub fn parse_str(&mut self, content: &str) -> HierarchyResult<HierarchyTree> {
        self.seen_ids.clear();
        let mut tree = HierarchyTree::new();
        // Root-to-current path as (depth, index) pairs
        let mut stack: Vec<(usize, Index)> = Vec::new();

        for (line_idx, line) in content.lines().enumerate() {
            let line_no = line_idx + 1;
            let depth = self.parse_depth(line, line_no)?;
            let data = self.parse_record(&line[depth * 2..], line_no)?;

            if !self.seen_ids.insert(data.id) {
                return Err(HierarchyError::ParseFailure {
                    line: line_no,
                    reason: format!("duplicate employee id {}", data.id),
                });
            }

            while stack.last().is_some_and(|&(d, _)| d >= depth) {
                stack.pop();
            }

            let parent = match stack.last() {
                None if depth == 0 => {
                    if tree.root().is_some() {
                        return Err(HierarchyError::ParseFailure {
                            line: line_no,
                            reason: "second unindented line; a listing has one root".to_string(),
                        });
                    }
                    None
                }
                None => {
                    return Err(HierarchyError::ParseFailure {
                        line: line_no,
                        reason: "first line must be unindented".to_string(),
                    });
                }
                Some(&(parent_depth, parent_idx)) => {
                    if depth > parent_depth + 1 {
                        return Err(HierarchyError::ParseFailure {
                            line: line_no,
                            reason: "indentation jumps more than one level".to_string(),
                        });
                    }
                    Some(parent_idx)
                }
            };

            let idx = tree.insert_node(data, parent);
            stack.push((depth, idx));
        }

        Ok(tree)
    }

    fn parse_depth(&self, line: &str, line_no: usize) -> HierarchyResult<usize> {
        let spaces = line.len() - line.trim_start_matches(' ').len();
        if spaces % 2 != 0 {
            return Err(HierarchyError::ParseFailure {
                line: line_no,
                reason: "indentation is not a multiple of two spaces".to_string(),
            });
        }
        Ok(spaces / 2)
    }

    fn parse_record(&self, content: &str, line_no: usize) -> HierarchyResult<EmployeeData> {
        let caps = self
            .line_regex
            .captures(content)
            .ok_or_else(|| HierarchyError::ParseFailure {
                line: line_no,
                reason: "malformed employee line".to_string(),
            })?;

        let id: u32 = caps[2].parse().map_err(|_| HierarchyError::ParseFailure {
            line: line_no,
            reason: "employee id out of range".to_string(),
        })?;

        Ok(EmployeeData::new(id, &caps[3], &caps[1]))
    }
}
