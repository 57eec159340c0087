// Command routing and dispatch

use std::path::PathBuf;

use artisan_shortcuts::{logging, ArtisanConfig, ConfigLoader, LogLevel};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::commands::*;
use crate::error::CliResult;

/// Shortcut Artisan - define keyboard shortcuts that trigger automations
#[derive(Parser, Debug)]
#[command(name = "artisan")]
#[command(bin_name = "artisan")]
#[command(about = "Normalize, check and describe shortcut definitions")]
#[command(version)]
#[command(author = "Shortcut Artisan Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/shortcut-artisan/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Normalize raw key identifiers into a key combination
    #[command(about = "Print the combination a set of held keys normalizes to")]
    Normalize {
        /// Raw key identifiers, e.g. Control d
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
    },

    /// Check a shortcut against the submission rules
    #[command(about = "Validate a shortcut and print its request payload")]
    Check {
        /// Key combination, e.g. CTRL+D
        #[arg(long, value_name = "COMBO")]
        keys: Option<String>,

        /// Command name
        #[arg(long)]
        name: Option<String>,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Action type, e.g. OpenFolder
        #[arg(long, value_name = "TYPE")]
        action: String,

        /// Action parameter, repeatable
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Show required parameters per action type
    #[command(about = "Print the required parameters of every action type")]
    Schema,
}

/// Route and execute commands
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();

        let config = Self::load_config(&cli)?;
        logging::init(&config.logging);
        debug!(store = ?config.store, "Configuration loaded");

        Self::execute(&cli)
    }

    /// Load configuration, letting `--verbose` raise the log level
    pub fn load_config(cli: &Cli) -> CliResult<ArtisanConfig> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load()?;
        if cli.verbose {
            config.logging.level = LogLevel::Debug;
        }
        Ok(config)
    }

    /// Execute a command
    pub fn execute(cli: &Cli) -> CliResult<()> {
        Self::command(&cli.command).execute()
    }

    fn command(command: &Commands) -> Box<dyn Command> {
        match command {
            Commands::Normalize { keys } => Box::new(NormalizeCommand::new(keys.clone())),
            Commands::Check {
                keys,
                name,
                description,
                action,
                params,
            } => Box::new(
                CheckCommand::new(action.clone())
                    .with_keys(keys.clone())
                    .with_name(name.clone())
                    .with_description(description.clone())
                    .with_params(params.clone()),
            ),
            Commands::Schema => Box::new(SchemaCommand::new()),
        }
    }
}
