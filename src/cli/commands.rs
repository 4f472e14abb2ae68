//! Command dispatch: loads settings, parses outlines, prints results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{IoResultExt, OutlineService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::NoteTree;
use crate::tree_traits::TreeNodeConvert;

const STDIN_MARKER: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file }) => cmd_tree(cli, file.as_deref()),
        Some(Commands::Leaves { file }) => cmd_leaves(cli, file.as_deref()),
        Some(Commands::Paths { file }) => cmd_paths(cli, file.as_deref()),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(cli),
            ConfigCommands::Init { global } => cmd_config_init(*global),
            ConfigCommands::Path => cmd_config_path(),
        },
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

/// Outline file to read, `None` meaning stdin.
fn input_file(file: Option<&Path>) -> Option<&Path> {
    file.filter(|p| *p != Path::new(STDIN_MARKER))
}

fn current_dir() -> CliResult<PathBuf> {
    let cwd = std::env::current_dir().with_path_context("resolve working directory", Path::new("."))?;
    Ok(cwd)
}

/// Settings for an outline in `outline_dir`, with CLI flags on top.
fn settings_for(cli: &Cli, outline_dir: &Path) -> CliResult<Settings> {
    let settings = Settings::load(Some(outline_dir))?
        .with_overrides(cli.images_path.as_deref(), cli.images_suffix.as_deref());
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(level = "debug", skip(cli))]
fn load_tree(cli: &Cli, file: Option<&Path>) -> CliResult<NoteTree> {
    let tree = match input_file(file) {
        Some(path) => {
            if path.is_dir() {
                return Err(CliError::InvalidArgs(format!(
                    "expected an outline file, got directory: {}",
                    path.display()
                )));
            }
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => current_dir()?,
            };
            OutlineService::new(settings_for(cli, &dir)?).parse_file(path)?
        }
        None => {
            let settings = settings_for(cli, &current_dir()?)?;
            OutlineService::new(settings).parse_reader(io::stdin().lock())?
        }
    };

    if tree.is_empty() {
        output::warning("no indented entries found");
    }
    Ok(tree)
}

fn cmd_tree(cli: &Cli, file: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(cli, file)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

fn cmd_leaves(cli: &Cli, file: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(cli, file)?;
    for line in leaf_lines(&tree) {
        output::info(&line);
    }
    Ok(())
}

fn cmd_paths(cli: &Cli, file: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(cli, file)?;
    for line in path_lines(&tree) {
        output::info(&line);
    }
    Ok(())
}

/// Leaf texts as shown to the user, trimmed like the tree view.
fn leaf_lines(tree: &NoteTree) -> Vec<String> {
    tree.leaf_nodes()
        .iter()
        .map(|text| text.trim().to_string())
        .collect()
}

/// One `a > b > c` line per leaf.
fn path_lines(tree: &NoteTree) -> Vec<String> {
    tree.iter()
        .filter(|(_, entry)| !entry.is_root() && entry.is_leaf())
        .map(|(idx, _)| {
            tree.path_to(idx)
                .iter()
                .map(|text| text.trim())
                .collect::<Vec<_>>()
                .join(" > ")
        })
        .collect()
}

fn cmd_config_show(cli: &Cli) -> CliResult<()> {
    let settings = settings_for(cli, &current_dir()?)?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_init(global: bool) -> CliResult<()> {
    let path = if global {
        let dir = global_config_dir()
            .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))?;
        fs::create_dir_all(&dir).with_path_context("create config directory", &dir)?;
        dir.join("crumbs.toml")
    } else {
        local_config_path(&current_dir()?)
    };

    if path.exists() {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
    output::success(&format!("created {}", path.display()));
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    let global = global_config_path()
        .map(|p| describe_path(&p))
        .unwrap_or_else(|| "(unavailable)".to_string());
    output::action("global", &global);
    output::action("local", &describe_path(&local_config_path(&current_dir()?)));
    Ok(())
}

fn describe_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
