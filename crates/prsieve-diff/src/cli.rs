use crate::cleanser::{cleanse_diff, CleanseOptions};
use crate::report::format_cleansing_summary_for_comment;
use crate::types::CleanseOutcome;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use prsieve_core::CleanseConfig;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cleansed diff text
    Text,
    /// `{cleansedDiff, summary}` as JSON
    Json,
    /// Markdown summary for a pull-request comment
    Comment,
}

#[derive(Debug, Args)]
pub struct CleanseArgs {
    /// Read the diff from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Repository root holding the ignore file
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Override the ignore file name
    #[arg(long)]
    pub ignore_file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: CleanseArgs, config: &CleanseConfig) -> Result<()> {
    let raw_diff = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read diff from {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read diff from stdin")?;
            input
        }
    };

    let mut options = CleanseOptions::from_config(&args.repo_root, config);
    if let Some(name) = args.ignore_file {
        options.ignore_file = name;
    }

    let outcome = cleanse_diff(&raw_diff, &options)?;
    let rendered = render(&outcome, args.format)?;

    let mut stdout = io::stdout().lock();
    match stdout.write_all(rendered.as_bytes()) {
        // downstream closed the pipe early (e.g. `| head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write output"),
    }
}

fn render(outcome: &CleanseOutcome, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => outcome.cleansed_diff.clone(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(outcome)?;
            json.push('\n');
            json
        }
        OutputFormat::Comment => {
            let mut md = format_cleansing_summary_for_comment(&outcome.summary);
            md.push('\n');
            md
        }
    })
}
