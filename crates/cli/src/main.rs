// SCALE Align CLI - build and browse taxonomy alignment artifacts

mod browse;
mod compare;
mod exit_codes;
mod ingest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "salign")]
#[command(about = "Align two classification taxonomies line by line and compare their definitions")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug). Overridden by SALIGN_LOG.
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the alignment artifact from a TOML config
    #[command(after_help = "\
Examples:
  salign build align.toml
  salign build align.toml --output web/alignments.json
  salign build align.toml --json | jq '.correspondences | length'
  salign build align.toml --strict")]
    Build {
        /// Path to the align.toml config file
        config: PathBuf,

        /// Write the artifact here (overrides [output].json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the artifact to stdout
        #[arg(long)]
        json: bool,

        /// Exit non-zero if any file was missing or any line was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Validate an align.toml config without building
    #[command(after_help = "\
Examples:
  salign validate align.toml")]
    Validate {
        /// Path to the align.toml config file
        config: PathBuf,
    },

    /// Word-level diff of two sentences
    #[command(after_help = "\
Examples:
  salign diff 'The cat sat' 'A cat sat'
  salign diff 'Growing of rice' 'Growing of wild rice' --json")]
    Diff {
        /// Source-side text
        source: String,

        /// Target-side text
        target: String,

        /// Output JSON {source, target, similarity} instead of marked-up text
        #[arg(long)]
        json: bool,
    },

    /// List correspondences in a built artifact
    #[command(after_help = "\
Examples:
  salign list alignments.json
  salign list alignments.json --search A011 --sort target
  salign list alignments.json --json")]
    List {
        /// Path to a built alignments.json
        artifact: PathBuf,

        /// Case-insensitive substring of either code
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Order by source or target code
        #[arg(long, value_enum, default_value = "source")]
        sort: SortArg,

        /// Output JSON array instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one correspondence with a word diff per alignment
    #[command(after_help = "\
Examples:
  salign show alignments.json A0111_A01.11
  salign show alignments.json A0111_A01.11 --next
  salign show alignments.json --search A01          # first match
  salign show alignments.json A0111_A01.11 --json")]
    Show {
        /// Path to a built alignments.json
        artifact: PathBuf,

        /// Correspondence id (`{source}_{target}`); defaults to the first listed
        id: Option<String>,

        /// Step to the next entry in the listed order
        #[arg(long, conflicts_with = "prev")]
        next: bool,

        /// Step to the previous entry in the listed order
        #[arg(long)]
        prev: bool,

        /// Case-insensitive substring of either code
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Order by source or target code
        #[arg(long, value_enum, default_value = "source")]
        sort: SortArg,

        /// Output JSON instead of marked-up text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Source,
    Target,
}

impl From<SortArg> for scale_align::browse::SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Source => Self::Source,
            SortArg::Target => Self::Target,
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("SALIGN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr; stdout is reserved for --json output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: salign <command> [options]");
            eprintln!("       salign --help for more information");
            Ok(())
        }
        Some(Commands::Build { config, output, json, strict }) => {
            ingest::cmd_build(config, output, json, strict)
        }
        Some(Commands::Validate { config }) => ingest::cmd_validate(config),
        Some(Commands::Diff { source, target, json }) => compare::cmd_diff(&source, &target, json),
        Some(Commands::List { artifact, search, sort, json }) => {
            browse::cmd_list(artifact, search, sort.into(), json)
        }
        Some(Commands::Show { artifact, id, next, prev, search, sort, json }) => {
            let step = if next {
                Some(scale_align::browse::Direction::Down)
            } else if prev {
                Some(scale_align::browse::Direction::Up)
            } else {
                None
            };
            browse::cmd_show(artifact, id, step, search, sort.into(), json)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Create error from an engine error with its registered exit code.
    pub fn align(err: scale_align::AlignError) -> Self {
        Self::new(exit_codes::align_exit_code(&err), err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
