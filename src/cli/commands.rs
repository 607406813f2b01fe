//! Command dispatch: settings, services and terminal output per subcommand.

use std::fs;
use std::io;

use clap::CommandFactory;
use tracing::{debug, info, instrument};

use crate::application::render;
use crate::application::services::{GameSession, GenerationMode};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, Mode};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the parsed command. Returns the process exit code on success.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(exitcode::OK);
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(exitcode::OK);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Play { mode, size, seed } => play(&container, *mode, *size, *seed),
        Commands::Generate {
            size,
            seed,
            no_events,
        } => generate(&container, *size, *seed, *no_events),
        Commands::Rules => {
            output::info(&render::rules(&container.table));
            Ok(exitcode::OK)
        }
        Commands::Config { command } => config_command(&container, command),
        Commands::Completion { .. } => Ok(exitcode::OK),
    }
}

fn resolve_size(container: &ServiceContainer, requested: Option<usize>) -> CliResult<usize> {
    let settings = &container.settings;
    settings.resolve_size(requested).map_err(|size| {
        CliError::InvalidArgs(format!(
            "size must be between {} and {}, got {}",
            settings.min_size, settings.max_size, size
        ))
    })
}

#[instrument(level = "debug", skip(container))]
fn play(
    container: &ServiceContainer,
    mode: Mode,
    size: Option<usize>,
    seed: Option<u64>,
) -> CliResult<i32> {
    let size = resolve_size(container, size)?;
    let mut rng = container.rng(seed);
    let generation = match mode {
        Mode::Mini => GenerationMode::Bare,
        Mode::Normal | Mode::Debug => GenerationMode::WithEvents,
    };

    let maze = container.maze_service().generate(size, generation, &mut rng)?;
    for warning in maze.warnings() {
        output::warning(&warning);
    }
    info!("playing maze of {} rooms, seed {}", size, rng.seed());
    if mode == Mode::Debug {
        output::action("Seed", &rng.seed());
        output::action("Rooms", &maze.tree.len());
    }

    let session = GameSession::new(maze.tree).map_err(ApplicationError::from)?;
    let summary = container
        .game_service()
        .run(session, mode == Mode::Debug, &mut rng)?;
    debug!("summary: {:?}", summary);

    Ok(if summary.won {
        exitcode::OK
    } else {
        exitcode::NOT_WON
    })
}

#[instrument(level = "debug", skip(container))]
fn generate(
    container: &ServiceContainer,
    size: Option<usize>,
    seed: Option<u64>,
    no_events: bool,
) -> CliResult<i32> {
    let size = resolve_size(container, size)?;
    let mut rng = container.rng(seed);
    let generation = if no_events {
        GenerationMode::Bare
    } else {
        GenerationMode::WithEvents
    };

    let maze = container.maze_service().generate(size, generation, &mut rng)?;
    output::header(&format!("Maze of {} rooms", maze.tree.len()));
    output::action("Seed", &rng.seed());
    output::action("Height", &maze.tree.height());
    output::info(&render::debug_view(&maze.tree, None, true));
    for warning in maze.warnings() {
        output::warning(&warning);
    }
    Ok(exitcode::OK)
}

fn config_command(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match config::global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not found" };
                output::action("Global", &format!("{} ({})", path.display(), state));
            }
            None => output::warning("no home directory, global config unavailable"),
        },
        ConfigCommands::Init { force } => {
            let path = config::global_config_path().ok_or_else(|| {
                CliError::Usage("no home directory, cannot place global config".into())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
            }
            fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
        }
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn run(args: &[&str]) -> CliResult<i32> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        execute_command(&cli)
    }

    /// Config pinning the size bounds so the machine's global file cannot interfere.
    fn bounds_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = 10\nmin_size = 10\nmax_size = 50").unwrap();
        file
    }

    #[test]
    fn given_size_below_range_when_generating_then_usage_exit_code() {
        let file = bounds_file();
        let config = file.path().to_str().unwrap();
        let err = run(&["treemaze", "--config", config, "generate", "--size", "5"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgs(_)));
        assert_eq!(err.exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_size_above_range_when_playing_then_usage_exit_code() {
        let file = bounds_file();
        let config = file.path().to_str().unwrap();
        let err = run(&["treemaze", "--config", config, "play", "--size", "500"]).unwrap_err();
        assert_eq!(err.exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_valid_size_when_generating_then_ok() {
        let file = bounds_file();
        let config = file.path().to_str().unwrap();
        let code = run(&[
            "treemaze", "--config", config, "generate", "--size", "12", "--seed", "4",
        ])
        .unwrap();
        assert_eq!(code, exitcode::OK);
    }

    #[test]
    fn given_missing_config_file_when_running_then_config_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = run(&["treemaze", "--config", missing.to_str().unwrap(), "rules"]).unwrap_err();
        assert_eq!(err.exit_code(), exitcode::CONFIG);
    }
}
