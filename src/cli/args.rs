//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Procedurally generated binary-tree maze: find the exit, mind the door
#[derive(Parser, Debug)]
#[command(name = "treemaze")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug logging, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a freshly generated maze
    Play {
        /// Game mode
        #[arg(short, long, value_enum, default_value_t = Mode::Normal)]
        mode: Mode,
        /// Number of rooms (default from config)
        #[arg(short, long)]
        size: Option<usize>,
        /// Seed for a reproducible maze
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a maze and print the whole tree
    Generate {
        /// Number of rooms (default from config)
        #[arg(short, long)]
        size: Option<usize>,
        /// Seed for a reproducible maze
        #[arg(long)]
        seed: Option<u64>,
        /// Only entrance and exit, no key, door or hazards
        #[arg(long)]
        no_events: bool,
    },

    /// Show the rules and the event legend
    Rules,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Game modes of the main menu.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Entrance and exit only
    Mini,
    /// Key, door and hazards
    Normal,
    /// Normal game with the whole tree drawn every turn
    Debug,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn given_cli_definition_when_asserted_then_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_play_args_when_parsed_then_mode_and_size_set() {
        let cli = Cli::try_parse_from(["treemaze", "-dd", "play", "--mode", "mini", "-s", "12"])
            .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Play { mode, size, seed }) => {
                assert_eq!(mode, Mode::Mini);
                assert_eq!(size, Some(12));
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_unknown_mode_when_parsed_then_rejected() {
        assert!(Cli::try_parse_from(["treemaze", "play", "--mode", "hard"]).is_err());
    }
}
