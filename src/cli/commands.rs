use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::shell::Shell;
use crate::config::{config_file_path, Settings};
use crate::export::ToTreeString;
use crate::parser::HierarchyParser;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;

    match &cli.command {
        Some(Commands::Shell { file }) => _shell(file.as_deref(), &settings),
        None => _shell(None, &settings),
        Some(Commands::Show { file }) => _show(file.as_deref(), &settings),
        Some(Commands::Tree { file }) => _tree(file.as_deref(), &settings),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&settings),
            ConfigCommands::Path => _config_path(),
        },
    }
}

#[instrument(skip(settings))]
fn _shell(file: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let stdin = io::stdin();
    let mut shell = Shell::new(settings.clone());
    if let Some(path) = resolve_file(file, settings) {
        shell.preload(&path, file.is_some())?;
    }
    shell.run(&mut stdin.lock())
}

#[instrument(skip(settings))]
fn _show(file: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let path = require_file(file, settings)?;
    debug!("file: {:?}", path);
    let tree = HierarchyParser::new().load_from_file(&path)?;
    print!("{}", crate::export::render(&tree));
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(file: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let path = require_file(file, settings)?;
    debug!("file: {:?}", path);
    let tree = HierarchyParser::new().load_from_file(&path)?;
    println!("{}", tree.to_tree_string());
    Ok(())
}

#[instrument(skip(settings))]
fn _config_show(settings: &Settings) -> CliResult<()> {
    print!("{}", settings.to_toml_string());
    Ok(())
}

#[instrument]
fn _config_path() -> CliResult<()> {
    match config_file_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("no config directory resolvable on this system"),
    }
    Ok(())
}

/// Explicit file argument, falling back to the configured `data_file`.
fn resolve_file(file: Option<&Path>, settings: &Settings) -> Option<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| settings.data_file.clone())
        .map(|p| expand_path(&p))
}

fn require_file(file: Option<&Path>, settings: &Settings) -> CliResult<PathBuf> {
    resolve_file(file, settings).ok_or_else(|| {
        CliError::Usage("no hierarchy file given and no data_file configured".to_string())
    })
}

/// Expand `~` and environment variables in user-supplied paths.
pub(crate) fn expand_path(path: &Path) -> PathBuf {
    shellexpand::full(&path.to_string_lossy())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}
