use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prsieve_core::{init_logging, Config};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "prsieve", version, about = "Cleanse PR diffs for LLM review and post AI review comments")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Specify configuration file path
    #[arg(long, global = true, env = "PRSIEVE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, env = "PRSIEVE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cleanse a unified diff read from a file or stdin
    Cleanse(prsieve_diff::CleanseArgs),

    /// Review a pull request with the OpenAI Responses API and post the result
    Review(prsieve_review::ReviewArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let repo_root = match &cli.command {
        Command::Cleanse(args) => args.repo_root.clone(),
        Command::Review(args) => args.repo_root.clone(),
    };
    let config = load_config(cli.config.as_deref(), &repo_root)?;

    let log = config.log_or_default();
    let level = cli.log_level.as_deref().unwrap_or(&log.level);
    let _guard = init_logging(level, log.file.as_deref().map(Path::new));
    tracing::debug!("configuration version {}", config.version);

    match cli.command {
        Command::Cleanse(args) => prsieve_diff::run(args, &config.cleanse_or_default()),
        Command::Review(args) => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(prsieve_review::run(
                args,
                &config.review_or_default(),
                &config.cleanse_or_default(),
            ))
        }
    }
}

fn load_config(explicit: Option<&Path>, repo_root: &Path) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::load(repo_root)),
    }
}
