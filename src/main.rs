use anyhow::{Context, Result};
use colored::Colorize;
use edtext::cli::{parse_args, Args, Substitution};
use edtext::config::{self, Config};
use edtext::{logger, Document, Range};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};

fn main() -> Result<()> {
    let args = parse_args()?;

    match args {
        Args::Select {
            ranges,
            file,
            substitution,
            number,
            explain,
            debug,
        } => {
            let config = load_config_or_default();
            if debug || config.logging.debug {
                match config::config_dir() {
                    Ok(dir) => {
                        logger::init_debug_logging(true, &dir)?;
                    }
                    Err(e) => eprintln!("Warning: Logging disabled: {:#}", e),
                }
            }
            select(&config, &ranges, file.as_deref(), substitution, number, explain)?;
        }
        Args::Config { show, reset } => {
            manage_config(show, reset)?;
        }
    }

    Ok(())
}

fn load_config_or_default() -> Config {
    config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: Using default configuration: {:#}", e);
        Config::default()
    })
}

fn read_input(file: Option<&str>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {}", path)),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn select(
    config: &Config,
    ranges: &[String],
    file: Option<&str>,
    substitution: Option<Substitution>,
    number: bool,
    explain: bool,
) -> Result<()> {
    let mut doc = Document::from_text(read_input(file)?);
    tracing::info!(lines = doc.len(), ?ranges, "loaded document");

    if let Some(sub) = substitution {
        doc = if sub.global || config.substitution.global {
            doc.substitute_all(&sub.pattern, &sub.replacement)?
        } else {
            doc.substitute(&sub.pattern, &sub.replacement)?
        };
    }

    // No ranges means the whole document
    let indices: Vec<usize> = if ranges.is_empty() {
        (0..doc.len()).collect()
    } else {
        doc.line_numbers(ranges)?
    };

    if explain {
        let parsed = ranges
            .iter()
            .map(|r| Range::parse(r))
            .collect::<edtext::Result<Vec<_>>>()?;
        let report = serde_json::json!({
            "ranges": parsed,
            "lines": indices.iter().map(|i| i + 1).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stdout = io::stdout();
    if !(config.output.color && stdout.is_terminal()) {
        colored::control::set_override(false);
    }

    let mut out = stdout.lock();
    let number = number || config.output.number_lines;
    let width = doc.len().to_string().len();
    for idx in indices {
        let line = &doc.lines()[idx];
        if number {
            let label = format!("{:>width$}", idx + 1, width = width);
            write!(out, "{} ", label.cyan())?;
        }
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;

    Ok(())
}

fn manage_config(show: bool, reset: bool) -> Result<()> {
    let path = config::config_file_path()?;

    if reset {
        config::save_default_config(&path)?;
        println!("Configuration reset: {}", path.display());
        return Ok(());
    }

    let config = config::load_or_create(&path)?;
    if show {
        println!("# {}", path.display());
        print!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
    } else {
        println!("Configuration file: {}", path.display());
        println!("Log file: {}", logger::default_log_path().display());
    }

    Ok(())
}
