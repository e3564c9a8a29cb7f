use clap::{Parser, Subcommand};
use pharmalens::cli;
use pharmalens::error::LensResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pharmalens")]
#[command(about = "Pharmacy service performance from PCC spreadsheet exports")]
#[command(long_about = "Pharmalens - PCC spreadsheet analyzer

Reads a monthly PCC export (.xlsx, sheet \"Table 1\"), normalizes the loosely
formatted grid, and reports per-branch monthly trends plus per-family
Average PCM classifications against configurable thresholds.

COMMANDS:
  analyze   - Full analysis: trends + aggregate comparisons
  validate  - Structural checks only (header, months, keys)
  trends    - One branch's melted monthly observations
  compare   - One service family's Average PCM classification
  watch     - Re-run the analysis whenever the file changes

EXAMPLES:
  pharmalens analyze report.xlsx
  pharmalens analyze report.xlsx --json > records.json
  pharmalens trends report.xlsx --branch \"TRINITY PHARMACY FKP10\"
  pharmalens compare report.xlsx --family \"Blood Pressure\"
  pharmalens watch report.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run the full analysis pipeline on one workbook.

Locates the header row, disambiguates repeated service names across branches,
melts monthly columns into long-format observations, and classifies each
configured family's aggregate metric against its threshold.

Branch rosters, families, thresholds and colors come from a YAML config file
(--config); without one, the built-in deployment config is used.

Use --json to emit the full record set (month axis, branch trends, family
outcomes) for a downstream renderer instead of terminal summaries.")]
    /// Full analysis: trends + aggregate comparisons
    Analyze {
        /// Path to PCC export (.xlsx)
        file: PathBuf,

        /// Path to YAML dashboard config (defaults to the built-in one)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit the full report as JSON instead of terminal summaries
        #[arg(long)]
        json: bool,

        /// Show verbose processing steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Check workbook structure without extracting data.

Verifies the sheet exists, the header row can be located (a row containing a
'Jan-24'-style month column), and reports row/month/key counts. Fails with a
structural error when the sheet or header is missing.")]
    /// Structural checks only
    Validate {
        /// Path to PCC export (.xlsx)
        file: PathBuf,

        /// Path to YAML dashboard config (defaults to the built-in one)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print one branch's melted monthly observations
    Trends {
        /// Path to PCC export (.xlsx)
        file: PathBuf,

        /// Branch name as listed in the config
        #[arg(short, long)]
        branch: String,

        /// Path to YAML dashboard config (defaults to the built-in one)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Classify one service family's aggregate metric
    Compare {
        /// Path to PCC export (.xlsx)
        file: PathBuf,

        /// Family name as listed in the config
        #[arg(short, long)]
        family: String,

        /// Path to YAML dashboard config (defaults to the built-in one)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    #[command(long_about = "Watch a workbook and re-run the analysis on change.

Each run reprocesses the complete snapshot from scratch; there is no
incremental state between runs. Saves are debounced so one save triggers one
run.

Press Ctrl+C to stop watching.")]
    /// Re-run the analysis whenever the file changes
    Watch {
        /// Path to PCC export (.xlsx)
        file: PathBuf,

        /// Path to YAML dashboard config (defaults to the built-in one)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> LensResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            config,
            json,
            verbose,
        } => cli::analyze(file, config, json, verbose),

        Commands::Validate { file, config } => cli::validate(file, config),

        Commands::Trends {
            file,
            branch,
            config,
        } => cli::trends(file, branch, config),

        Commands::Compare {
            file,
            family,
            config,
        } => cli::compare(file, family, config),

        Commands::Watch {
            file,
            config,
            verbose,
        } => cli::watch(file, config, verbose),
    }
}
