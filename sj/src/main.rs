//! sigmajudge - SIGMA rule comparison judge
//!
//! CLI entry point for rendering judge prompts and checking verdicts.

use std::fs;
use std::io::Read;
use std::path::Path;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use sigmajudge::cli::{Cli, Command, OutputFormat};
use sigmajudge::config::Config;
use sigmajudge::evaluation::{EvaluationResult, parse_response, validate_response};
use sigmajudge::extract;
use sigmajudge::prompts::{JUDGE_TEMPLATE, PromptLoader};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") | None => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", other);
            tracing::Level::WARN
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre!("Failed to install subscriber: {}", e))?;

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if !is_stdin(Some(p)) => {
            debug!(?p, "read_input: reading file");
            fs::read_to_string(p).context(format!("Failed to read {}", p.display()))
        }
        _ => {
            debug!("read_input: reading stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_text(result: &EvaluationResult) {
    println!("{} valid judge response", "✓".green());
    println!("  {:<34} {}", "Score:", format!("{:.2}", result.score).cyan());
    for (criterion, score) in result.criteria_scores.iter() {
        println!(
            "  {:<34} {:.2}",
            format!("{} ({:.0}%):", criterion.label(), criterion.weight() * 100.0),
            score
        );
    }
    println!(
        "  {:<34} {:.2} {}",
        "Weighted criteria:",
        result.criteria_scores.weighted_score(),
        format!("(gap {:+.2})", result.weighting_gap()).dimmed()
    );
    println!("  Reasoning: {}", result.reasoning);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Render {
            candidate,
            reference,
            output,
        } => {
            if is_stdin(Some(candidate.as_path())) && is_stdin(Some(reference.as_path())) {
                return Err(eyre!("Only one of --candidate and --reference may be read from stdin"));
            }
            let candidate = read_input(Some(candidate.as_path()))?;
            let reference = read_input(Some(reference.as_path()))?;

            let loader = PromptLoader::new(config.prompts.dir.as_deref());
            let prompt = loader.render_judge(&candidate, &reference)?;

            match output {
                Some(path) => {
                    fs::write(&path, &prompt).context(format!("Failed to write {}", path.display()))?;
                    info!("Wrote prompt to {}", path.display());
                    eprintln!("{} Wrote prompt to {}", "✓".green(), path.display().to_string().cyan());
                }
                None => print!("{}", prompt),
            }
        }
        Command::Validate { input, strict, format } => {
            let text = read_input(input.as_deref())?;
            let strict = strict || config.validation.strict;
            debug!(strict, "main: validating response");

            let result = if strict {
                validate_response(&text)?
            } else {
                parse_response(&text)?
            };

            match format.unwrap_or(config.output.format) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print_text(&result),
            }
        }
        Command::Extract { input } => {
            let text = read_input(input.as_deref())?;
            let rule = extract::yaml_block(&text).ok_or_else(|| eyre!("No YAML block found in input"))?;
            println!("{}", rule);
        }
        Command::Template => {
            let loader = PromptLoader::new(config.prompts.dir.as_deref());
            print!("{}", loader.load_template(JUDGE_TEMPLATE)?);
        }
    }

    Ok(())
}
