use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use cws::Result;
use cws::commands::add::AddArgs;
use cws::commands::completions::{self, Shell};
use cws::commands::{add, edit, launch, list, remove};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostic log filter
const LOG_ENV: &str = "CWS_LOG";

#[derive(Parser)]
#[command(name = "cws")]
#[command(about = "Launch the claude coding assistant in saved workspaces")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a workspace (interactive when no arguments are given)
    Add {
        /// Workspace name. Defaults to the directory name
        #[arg(value_hint = ValueHint::Other)]
        name: Option<String>,
        /// Working directory. Defaults to the current directory
        #[arg(value_hint = ValueHint::DirPath)]
        cwd: Option<String>,
        /// Additional directories passed with --add-dir
        #[arg(value_hint = ValueHint::DirPath)]
        dirs: Vec<String>,
    },
    /// Delete a workspace. If no name is given, opens interactive selection
    #[command(name = "rm", visible_alias = "delete")]
    Remove {
        #[arg(value_hint = ValueHint::Other)]
        name: Option<String>,
    },
    /// Edit a workspace. If no name is given, opens interactive selection
    Edit {
        #[arg(value_hint = ValueHint::Other)]
        name: Option<String>,
    },
    /// List all workspaces
    #[command(name = "ls", visible_alias = "list")]
    List {
        /// List workspace names for completion (internal use)
        #[arg(long, hide = true)]
        list_completions: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Launch the named workspace
    #[command(external_subcommand)]
    Launch(Vec<String>),
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let code = match cli.command {
        None => launch::launch(None)?,
        Some(Commands::Launch(args)) => {
            let Some((name, rest)) = args.split_first() else {
                anyhow::bail!("No workspace name given");
            };
            if !rest.is_empty() {
                anyhow::bail!("Unexpected arguments after workspace name: {}", rest.join(" "));
            }
            launch::launch(Some(name.as_str()))?
        }
        Some(Commands::Add { name, cwd, dirs }) => {
            add::add_workspace(AddArgs { name, cwd, dirs })?;
            0
        }
        Some(Commands::Remove { name }) => {
            remove::remove_workspace(name.as_deref())?;
            0
        }
        Some(Commands::Edit { name }) => {
            edit::edit_workspace(name.as_deref())?;
            0
        }
        Some(Commands::List { list_completions }) => {
            list::list_workspaces(list_completions)?;
            0
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            completions::generate_completions(shell, &mut cmd);
            0
        }
    };

    Ok(exit_code(code))
}
