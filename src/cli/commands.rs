use crate::config::DashboardConfig;
use crate::core::melt::TrendMelter;
use crate::core::months::month_columns;
use crate::core::normalize::normalize;
use crate::core::performance::{FamilyOutcome, PerformanceStatus};
use crate::error::{LensError, LensResult};
use crate::excel::SheetReader;
use crate::report::{build_report, DashboardReport, FamilyReport};
use crate::types::NormalizedTable;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Format an observation value for display, removing unnecessary decimals.
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Resolve the effective config: explicit YAML file, or the built-in default.
fn load_config(path: Option<&Path>) -> LensResult<DashboardConfig> {
    match path {
        Some(p) => DashboardConfig::load(p),
        None => Ok(DashboardConfig::default()),
    }
}

/// Open the workbook and normalize it under the given config.
fn load_table(file: &Path, config: &DashboardConfig) -> LensResult<NormalizedTable> {
    let sheet = SheetReader::new(file, &config.sheet_name).read()?;
    normalize(&sheet)
}

/// Execute the analyze command: the full pipeline, rendered as colored
/// summaries or emitted as a JSON record set for downstream rendering.
pub fn analyze(
    file: PathBuf,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> LensResult<()> {
    let config = load_config(config_path.as_deref())?;

    if json {
        let table = load_table(&file, &config)?;
        let report = build_report(&table, &config)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "💊 Pharmalens - Service Performance".bold().green());
    println!("   File: {}\n", file.display());

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let table = load_table(&file, &config)?;

    if verbose {
        let months = month_columns(&table);
        println!("   Sheet: {}", config.sheet_name);
        println!("   Service rows: {}", table.len());
        match (months.first(), months.last()) {
            (Some(first), Some(last)) => println!(
                "   Month columns: {} ({} to {})",
                months.len(),
                first.label,
                last.label
            ),
            _ => println!("   Month columns: 0"),
        }
        println!();
    }

    let report = build_report(&table, &config)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &DashboardReport) {
    println!("{}", "📈 Monthly Trends".bold().cyan());
    for trend in &report.branches {
        let present = trend
            .observations
            .iter()
            .filter(|obs| obs.is_present())
            .count();
        println!(
            "   {}: {} observations, {} with values",
            trend.branch.bright_blue().bold(),
            trend.observations.len(),
            present
        );
    }
    println!();

    println!("{}", "📊 Aggregate Comparisons".bold().cyan());
    for family in &report.families {
        print_family(family);
    }
}

fn print_family(report: &FamilyReport) {
    println!(
        "   {} {}",
        report.family.bright_blue().bold(),
        format!("(threshold {})", format_number(report.threshold)).yellow()
    );
    match &report.outcome {
        FamilyOutcome::NoData => {
            println!(
                "      {}",
                format!(
                    "⚠️  No valid {} values found for this family",
                    report.metric_column
                )
                .yellow()
            );
        }
        FamilyOutcome::Classified(entries) => {
            for entry in entries {
                match entry.status {
                    PerformanceStatus::Underperforming => println!(
                        "      {}",
                        format!(
                            "⚠️  {}: Underperforming (PCM = {})",
                            entry.label, entry.value
                        )
                        .red()
                        .bold()
                    ),
                    PerformanceStatus::PerformingWell => println!(
                        "      {}",
                        format!(
                            "✅ {}: Performing Well (PCM = {})",
                            entry.label, entry.value
                        )
                        .green()
                        .bold()
                    ),
                }
            }
        }
    }
}

/// Execute the validate command: structural checks only, no extraction.
pub fn validate(file: PathBuf, config_path: Option<PathBuf>) -> LensResult<()> {
    println!("{}", "✅ Validating workbook structure".bold().green());
    println!("   File: {}\n", file.display());

    let config = load_config(config_path.as_deref())?;
    let sheet = SheetReader::new(&file, &config.sheet_name).read()?;
    let table = normalize(&sheet)?;
    let months = month_columns(&table);
    let suffixed = table
        .rows
        .iter()
        .filter(|row| row.key != row.base)
        .count();

    println!("   Sheet: {}", config.sheet_name);
    println!("   Service rows: {}", table.len());
    match (months.first(), months.last()) {
        (Some(first), Some(last)) => println!(
            "   Month columns: {} ({} to {})",
            months.len(),
            first.label,
            last.label
        ),
        _ => println!("   {}", "Month columns: 0 (no month data)".yellow()),
    }
    println!("   Branch-suffixed keys: {}", suffixed);

    println!("\n{}", "✅ Structure looks good".bold().green());
    Ok(())
}

/// Execute the trends command: melt one branch's services and print the
/// long-format observations.
pub fn trends(file: PathBuf, branch: String, config_path: Option<PathBuf>) -> LensResult<()> {
    let config = load_config(config_path.as_deref())?;
    let spec = config.branch(&branch).ok_or_else(|| {
        LensError::Config(format!(
            "Branch '{}' not found in config. Available: {:?}",
            branch,
            config
                .branches
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>()
        ))
    })?;

    println!("{}", "📈 Pharmalens - Monthly Trends".bold().green());
    println!("   File: {}", file.display());
    println!("   Branch: {}\n", spec.name.bright_blue().bold());

    let table = load_table(&file, &config)?;
    let months = month_columns(&table);
    let melter = TrendMelter::new(&table, &months);
    let observations = melter.melt(&spec.services)?;

    if observations.is_empty() {
        println!(
            "{}",
            "⚠️  None of this branch's services are present in the upload".yellow()
        );
        return Ok(());
    }

    for obs in &observations {
        let value = match obs.value {
            Some(v) => format_number(v),
            None => "-".to_string(),
        };
        println!(
            "   {}  {}: {}",
            obs.month.label.cyan(),
            obs.service.bright_blue(),
            value.bold()
        );
    }
    Ok(())
}

/// Execute the compare command: classify one family's aggregate metric.
pub fn compare(file: PathBuf, family: String, config_path: Option<PathBuf>) -> LensResult<()> {
    let config = load_config(config_path.as_deref())?;
    let spec = config.family(&family).ok_or_else(|| {
        LensError::Config(format!(
            "Family '{}' not found in config. Available: {:?}",
            family,
            config
                .families
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
        ))
    })?;

    println!("{}", "📊 Pharmalens - Aggregate Comparison".bold().green());
    println!("   File: {}\n", file.display());

    let table = load_table(&file, &config)?;
    let report = build_report(&table, &config)?;
    let family_report = report
        .families
        .iter()
        .find(|f| f.family == spec.name)
        .ok_or_else(|| LensError::Internal(format!("Family '{}' missing from report", spec.name)))?;

    print_family(family_report);
    Ok(())
}

/// Execute the watch command: re-run the full analysis whenever the workbook
/// changes. Every run reprocesses the complete snapshot; nothing is carried
/// over between runs.
pub fn watch(file: PathBuf, config_path: Option<PathBuf>, verbose: bool) -> LensResult<()> {
    println!("{}", "👁️  Pharmalens - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(LensError::Config(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize().map_err(LensError::Io)?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| LensError::Config("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Debounce so a single save doesn't trigger several runs.
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| LensError::Config(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| LensError::Config(format!("Failed to watch directory: {}", e)))?;

    if verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&file, config_path.as_deref(), verbose);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    if event.kind != DebouncedEventKind::Any {
                        return false;
                    }
                    if let Ok(event_canonical) = event.path.canonicalize() {
                        if event_canonical == canonical_path {
                            return true;
                        }
                    }
                    if let Some(filename) = event.path.file_name() {
                        if let Some(our_filename) = canonical_path.file_name() {
                            if filename == our_filename {
                                return true;
                            }
                        }
                    }
                    false
                });

                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        timestamp().cyan()
                    );
                    run_watch_action(&file, config_path.as_deref(), verbose);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// One watch-mode run; failures are printed, not propagated, so the watcher
/// keeps running across bad saves.
fn run_watch_action(file: &Path, config_path: Option<&Path>, verbose: bool) {
    let result = load_config(config_path).and_then(|config| {
        let table = load_table(file, &config)?;
        if verbose {
            println!("   Service rows: {}", table.len());
        }
        let report = build_report(&table, &config)?;
        print_report(&report);
        Ok(())
    });
    match result {
        Ok(()) => println!("{}", "✅ Analysis complete".bold().green()),
        Err(e) => println!("{} {}", "❌ Analysis failed:".bold().red(), e),
    }
}
