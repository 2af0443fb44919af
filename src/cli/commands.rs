use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::ContextConfig;
use crate::context::build_context;
use crate::hooks::{HookInput, bootstrap, start, update};
use crate::parsers::{count_exchanges_in, parse_exchanges};
use crate::utils::format_path_with_tilde;

const PATH_PREVIEW_CHARS: usize = 50;

#[derive(Parser)]
#[command(name = "session-context")]
#[command(version = "0.1.0")]
#[command(about = "Summarize Claude Code sessions into context for the next session", long_about = None)]
pub struct Cli {
    /// Claude directory (defaults to ~/.claude)
    #[arg(long, global = true, env = "CLAUDE_CONFIG_DIR")]
    pub claude_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a digest for every existing project
    Bootstrap,
    /// Refresh the digest for the session named in hook JSON on stdin
    Update,
    /// Register the session named in hook JSON on stdin and print prior context
    Start,
    /// Print the digest for one session log
    Parse {
        /// Only print the exchange count
        #[arg(long)]
        count_only: bool,
        /// Path to the session log (.jsonl)
        path: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = || ContextConfig::resolve(cli.claude_dir.as_deref());

    match &cli.command {
        Some(Commands::Bootstrap) => run_bootstrap(&config()?)?,
        Some(Commands::Update) => {
            if let Some(input) = HookInput::from_reader(io::stdin().lock()) {
                update(&config()?, &input)?;
            }
        }
        Some(Commands::Start) => {
            if let Some(input) = HookInput::from_reader(io::stdin().lock())
                && let Some(digest) = start(&config()?, &input)?
            {
                print!("{}", digest);
            }
        }
        Some(Commands::Parse { count_only, path }) => run_parse(path, *count_only)?,
        None => {
            println!("Use --help for usage information");
        }
    }

    io::stdout().flush().context("Failed to flush stdout")?;
    Ok(())
}

fn run_parse(path: &Path, count_only: bool) -> Result<()> {
    if count_only {
        println!("{}", count_exchanges_in(path)?);
        return Ok(());
    }

    let digest = build_context(&parse_exchanges(path)?);
    if !digest.is_empty() {
        println!("{}", digest);
    }
    Ok(())
}

fn run_bootstrap(config: &ContextConfig) -> Result<()> {
    println!("Bootstrap Session Context");
    println!("{}", "=".repeat(50));

    if !config.projects_dir.exists() {
        println!("No projects directory found at {}", format_path_with_tilde(&config.projects_dir));
        return Ok(());
    }

    let stats = bootstrap(config)?;
    for path in &stats.generated_paths {
        let preview: String = path.chars().take(PATH_PREVIEW_CHARS).collect();
        println!("  ✓ {}...", preview);
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("Projects scanned: {}", stats.projects);
    println!("Context generated: {}", stats.generated);
    println!("Skipped (no valid sessions): {}", stats.skipped);
    println!();
    println!("Context stored in: {}", format_path_with_tilde(&config.context_dir));

    Ok(())
}
