use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "edtext")]
#[command(about = "Select lines from text with ed-style addresses")]
#[command(long_about = "edtext prints the lines of a file (or stdin) selected by ed-style range expressions.

Each RANGE is one or two addresses. Ranges are evaluated left to right and
each one starts where the previous one ended, so '/BEGIN/' followed by
'/END/' finds the first END after the first BEGIN.

ADDRESSES:
  10             Line 10
  $              Last line
  .              Current line (where the previous range ended)
  /regex/        Next line matching regex
  ADDR+N, ADDR-N Offset; '++' is +2, '---' is -3

SEPARATORS:
  A,B            B is counted from line 1
  A;B            B is counted from A

EXAMPLES:
  edtext 5,7 -f notes.txt                Lines 5 to 7
  edtext '/8$/,$' -f notes.txt           From the first line ending in 8 to the end
  cat log | edtext '/ERROR/;+3'          First error and the three lines after it
  edtext 1,3 '/TODO/' -n -f notes.txt    Two ranges, with line numbers
  edtext ',$' -s 'foo(\\d)' 'bar\\1' -f a.txt   Substitute, then select")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Range expressions (e.g., '5,7', '/pattern/+2', '$-1')
    #[arg(value_name = "RANGE")]
    ranges: Vec<String>,

    /// Read from FILE instead of stdin
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<String>,

    /// Substitute before selecting
    #[arg(short = 's', long, num_args = 2, value_names = ["PATTERN", "REPLACEMENT"])]
    #[arg(help = "Replace PATTERN with REPLACEMENT on every line before selecting\nReplacement may use \\1 or \\g<name> for groups")]
    substitute: Option<Vec<String>>,

    /// Replace every match on a line, not just the first
    #[arg(short = 'g', long, requires = "substitute")]
    global: bool,

    /// Prefix each line with its original line number
    #[arg(short = 'n', long)]
    number: bool,

    /// Print the parsed ranges and resolved line numbers as JSON
    #[arg(long)]
    explain: bool,

    /// Write debug logs to ~/.edtext/edtext.log
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or reset the configuration file
    #[command(long_about = "Manage the edtext configuration file (~/.edtext/config.toml).

CONFIGURATION OPTIONS:
  [logging]
    debug = false          # Write debug logs to ~/.edtext/edtext.log

  [substitution]
    global = false         # Replace every match per line (like -g)

  [output]
    number_lines = false   # Prefix lines with line numbers (like -n)
    color = true           # Color line numbers on a terminal

EXAMPLES:
  edtext config --show     Show current configuration
  edtext config --reset    Restore the default file")]
    Config {
        /// Show current configuration
        #[arg(long = "show")]
        show: bool,

        /// Overwrite the configuration file with defaults
        #[arg(long = "reset", conflicts_with = "show")]
        reset: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
    pub global: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Args {
    Select {
        ranges: Vec<String>,
        file: Option<String>,
        substitution: Option<Substitution>,
        number: bool,
        explain: bool,
        debug: bool,
    },
    Config {
        show: bool,
        reset: bool,
    },
}

pub fn parse_args() -> Result<Args> {
    into_args(Cli::parse())
}

/// Parse arguments from an explicit list (first item is the program name)
pub fn parse_args_from<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    into_args(Cli::try_parse_from(args)?)
}

fn into_args(cli: Cli) -> Result<Args> {
    if let Some(Commands::Config { show, reset }) = cli.command {
        return Ok(Args::Config { show, reset });
    }

    let substitution = match cli.substitute {
        Some(values) => {
            let [pattern, replacement]: [String; 2] = values
                .try_into()
                .map_err(|_| anyhow::anyhow!("--substitute takes PATTERN and REPLACEMENT"))?;
            Some(Substitution {
                pattern,
                replacement,
                global: cli.global,
            })
        }
        None => None,
    };

    Ok(Args::Select {
        ranges: cli.ranges,
        file: cli.file,
        substitution,
        number: cli.number,
        explain: cli.explain,
        debug: cli.debug,
    })
}
