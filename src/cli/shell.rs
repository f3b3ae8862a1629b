//! Interactive menu shell.
//!
//! Owns one [`HierarchyTree`] and translates line-based menu input into core
//! operations. All tree logic stays in the core; this layer only prompts,
//! prints and re-prompts on recoverable errors.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::HierarchyTree;
use crate::cli::commands::expand_path;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::errors::{HierarchyError, HierarchyResult};
use crate::export::{render, write_to_file};
use crate::parser::HierarchyParser;

pub struct Shell {
    tree: HierarchyTree,
    /// File the tree was loaded from or last saved to
    origin: Option<PathBuf>,
    settings: Settings,
}

impl Shell {
    pub fn new(settings: Settings) -> Self {
        Self {
            tree: HierarchyTree::new(),
            origin: None,
            settings,
        }
    }

    /// Load a hierarchy file before entering the menu.
    ///
    /// An explicitly requested file must load; a configured default that does
    /// not exist yet only warns and leaves the tree empty.
    #[instrument(skip(self))]
    pub fn preload(&mut self, path: &Path, required: bool) -> CliResult<()> {
        if path.exists() {
            self.tree = HierarchyParser::new().load_from_file(path)?;
            output::success(&format!(
                "Loaded {} employees from {}",
                self.tree.len(),
                path.display()
            ));
        } else if required {
            return Err(HierarchyError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
            .into());
        } else {
            output::warning(&format!(
                "configured data file {} not found, starting empty",
                path.display()
            ));
        }
        self.origin = Some(path.to_path_buf());
        Ok(())
    }

    pub fn run(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        loop {
            self.print_menu();
            let Some(choice) = self.read_line(input, "Choice:")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.create_organization(input)?,
                "2" => self.search(input)?,
                "3" => self.display(),
                "4" => self.export(input)?,
                "5" => self.manage(input)?,
                "6" => self.load(input)?,
                "7" => self.save(input)?,
                "0" => break,
                "" => continue,
                other => output::error(&format!("invalid choice: {}", other)),
            }
        }

        if self.settings.autosave {
            if let Some(origin) = self.origin.clone() {
                write_to_file(&self.tree, &origin)?;
                output::success(&format!("Saved to {}", origin.display()));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn tree(&self) -> &HierarchyTree {
        &self.tree
    }

    fn print_menu(&self) {
        output::header("Organization Hierarchy");
        output::info("1. Create organization");
        output::info("2. Search employee");
        output::info("3. Display hierarchy");
        output::info("4. Export to file");
        output::info("5. Manage employees");
        output::info("6. Load from file");
        output::info("7. Save");
        output::info("0. Exit");
    }

    #[instrument(skip(self, input))]
    fn create_organization(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        output::header("Create organization");
        let Some(id) = self.read_u32(input, "Root ID:")? else {
            return Ok(());
        };
        let Some(name) = self.read_line(input, "Root name:")? else {
            return Ok(());
        };
        let Some(role) = self.read_line(input, "Root role:")? else {
            return Ok(());
        };
        self.tree.create(id, &name, &role);
        output::success(&format!("Organization created with root {}", name));

        let Some(n) = self.read_u32(input, "Number of direct reports:")? else {
            return Ok(());
        };
        for i in 1..=n {
            output::header(&format!("Direct report {} of {}", i, n));
            if let Some(report_id) = self.prompt_new_employee(input, id)? {
                let Some(m) = self.read_u32(input, "Number of reports under this employee:")?
                else {
                    return Ok(());
                };
                for _ in 0..m {
                    self.prompt_new_employee(input, report_id)?;
                }
            }
        }
        Ok(())
    }

    /// Prompt for one employee and append it under `parent_id`.
    /// Returns the new id when the core accepted it.
    fn prompt_new_employee(
        &mut self,
        input: &mut impl BufRead,
        parent_id: u32,
    ) -> CliResult<Option<u32>> {
        let Some(id) = self.read_u32(input, "ID:")? else {
            return Ok(None);
        };
        let Some(name) = self.read_line(input, "Name:")? else {
            return Ok(None);
        };
        let Some(role) = self.read_line(input, "Role:")? else {
            return Ok(None);
        };
        match self.tree.add_employee(parent_id, id, &name, &role) {
            Ok(_) => {
                output::success(&format!("Added {} (ID: {})", name, id));
                Ok(Some(id))
            }
            Err(e) => {
                output::error(&e);
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, input))]
    fn search(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        output::header("Search employee");
        output::info("1. By id");
        output::info("2. By role");
        let Some(choice) = self.read_line(input, "Choice:")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let Some(id) = self.read_u32(input, "ID to search:")? else {
                    return Ok(());
                };
                match self
                    .tree
                    .find_by_id(id)
                    .and_then(|idx| self.tree.employee(idx))
                {
                    Some(data) => output::info(&format!(
                        "Employee found: ID: {}, Name: {}, Role: {}",
                        data.id, data.name, data.role
                    )),
                    None => output::info("No employee found with that id."),
                }
            }
            "2" => {
                let Some(role) = self.read_line(input, "Role to search:")? else {
                    return Ok(());
                };
                let found = self.tree.find_all_by_role(&role);
                if found.is_empty() {
                    output::info("No employees found.");
                } else {
                    let ids = found
                        .iter()
                        .filter_map(|&idx| self.tree.employee(idx))
                        .map(|data| data.id.to_string())
                        .join(", ");
                    output::header(&format!("Employees with role '{}' (ids {}):", role, ids));
                    for data in found.iter().filter_map(|&idx| self.tree.employee(idx)) {
                        output::detail(&format!("ID: {}, Name: {}", data.id, data.name));
                    }
                }
            }
            other => output::error(&format!("invalid choice: {}", other)),
        }
        Ok(())
    }

    fn display(&self) {
        if self.tree.is_empty() {
            output::info("No organization exists.");
        } else {
            print!("{}", render(&self.tree));
        }
    }

    #[instrument(skip(self, input))]
    fn export(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        let Some(filename) = self.read_line(input, "Filename:")? else {
            return Ok(());
        };
        if filename.is_empty() {
            output::error("filename must not be empty");
            return Ok(());
        }
        let path = expand_path(Path::new(&filename));
        match write_to_file(&self.tree, &path) {
            Ok(()) => output::success(&format!("Hierarchy written to {}", path.display())),
            Err(e) => output::error(&e),
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    fn manage(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        output::header("Manage employees");
        output::info("1. Add employee");
        output::info("2. Promote employee");
        output::info("3. Demote employee");
        output::info("4. Delete employee");
        output::info("5. Update employee");
        let Some(choice) = self.read_line(input, "Choice:")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let Some(supervisor_id) = self.read_u32(input, "Supervisor ID:")? else {
                    return Ok(());
                };
                self.prompt_new_employee(input, supervisor_id)?;
            }
            "2" => {
                let Some(id) = self.read_u32(input, "ID to promote:")? else {
                    return Ok(());
                };
                let Some(role) = self.read_line(input, "New role:")? else {
                    return Ok(());
                };
                let result = self.tree.promote(id, &role);
                report(result, "Employee promoted.");
            }
            "3" => {
                let Some(id) = self.read_u32(input, "ID to demote:")? else {
                    return Ok(());
                };
                let Some(role) = self.read_line(input, "New role:")? else {
                    return Ok(());
                };
                let result = self.tree.demote(id, &role);
                report(result, "Employee demoted.");
            }
            "4" => {
                let Some(id) = self.read_u32(input, "ID to delete:")? else {
                    return Ok(());
                };
                match self.tree.delete_subtree(id) {
                    Ok(removed) => {
                        output::success(&format!("Removed {} employee(s).", removed))
                    }
                    Err(e) => output::error(&e),
                }
            }
            "5" => {
                let Some(id) = self.read_u32(input, "ID to update:")? else {
                    return Ok(());
                };
                let Some(name) = self.read_line(input, "New name (leave empty to keep):")? else {
                    return Ok(());
                };
                let Some(role) = self.read_line(input, "New role (leave empty to keep):")? else {
                    return Ok(());
                };
                let result = self.tree.update(id, Some(&name), Some(&role));
                report(result, "Employee updated.");
            }
            other => output::error(&format!("invalid choice: {}", other)),
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    fn load(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        let Some(filename) = self.read_line(input, "Filename:")? else {
            return Ok(());
        };
        if filename.is_empty() {
            output::error("filename must not be empty");
            return Ok(());
        }
        let path = expand_path(Path::new(&filename));
        match HierarchyParser::new().load_from_file(&path) {
            Ok(tree) => {
                output::success(&format!(
                    "Loaded {} employees from {}",
                    tree.len(),
                    path.display()
                ));
                self.tree = tree;
                self.origin = Some(path);
            }
            Err(e) => output::error(&e),
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    fn save(&mut self, input: &mut impl BufRead) -> CliResult<()> {
        let path = match self.origin.clone() {
            Some(path) => path,
            None => {
                let Some(filename) = self.read_line(input, "Filename:")? else {
                    return Ok(());
                };
                if filename.is_empty() {
                    output::error("filename must not be empty");
                    return Ok(());
                }
                expand_path(Path::new(&filename))
            }
        };
        match write_to_file(&self.tree, &path) {
            Ok(()) => {
                output::success(&format!("Saved to {}", path.display()));
                self.origin = Some(path);
            }
            Err(e) => output::error(&e),
        }
        Ok(())
    }

    /// Read one trimmed line; `None` means end of input.
    fn read_line(&self, input: &mut impl BufRead, prompt: &str) -> CliResult<Option<String>> {
        output::prompt(prompt);
        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(HierarchyError::Io)?;
        if read == 0 {
            debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a number; invalid input prints an error and aborts the action.
    fn read_u32(&self, input: &mut impl BufRead, prompt: &str) -> CliResult<Option<u32>> {
        let Some(line) = self.read_line(input, prompt)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                output::error(&format!("not a number: {}", line));
                Ok(None)
            }
        }
    }
}

fn report(result: HierarchyResult<()>, success_msg: &str) {
    match result {
        Ok(()) => output::success(success_msg),
        Err(e) => output::error(&e),
    }
}
