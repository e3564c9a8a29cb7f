//! Report assembly
//!
//! Bundles the pipeline outputs into one serializable record set for the
//! rendering side: the month axis, per-branch melted trends, and per-family
//! classification outcomes. Branches and families appear in config order —
//! fixed and reproducible, never arrival order.

use crate::config::DashboardConfig;
use crate::core::melt::TrendMelter;
use crate::core::months::month_columns;
use crate::core::normalize::{normalize, strip_branch_suffix};
use crate::core::performance::{FamilyOutcome, PerformanceClassifier};
use crate::error::LensResult;
use crate::excel::SheetReader;
use crate::types::{Month, NormalizedTable, Observation};
use serde::Serialize;
use std::path::Path;

/// One branch's melted trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchTrend {
    pub branch: String,
    pub observations: Vec<Observation>,
}

/// One family's classification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyReport {
    pub family: String,
    pub metric_column: String,
    pub threshold: f64,
    pub outcome: FamilyOutcome,
}

/// Everything a rendering collaborator needs from one upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Chronologically sorted month axis.
    pub months: Vec<Month>,
    /// Number of service rows in the normalized table.
    pub service_count: usize,
    pub branches: Vec<BranchTrend>,
    pub families: Vec<FamilyReport>,
}

/// Build the full report from an already-normalized table.
pub fn build_report(
    table: &NormalizedTable,
    config: &DashboardConfig,
) -> LensResult<DashboardReport> {
    let months = month_columns(table);

    let melter = TrendMelter::new(table, &months);
    let mut branches = Vec::with_capacity(config.branches.len());
    for spec in &config.branches {
        branches.push(BranchTrend {
            branch: spec.name.clone(),
            observations: melter.melt(&spec.services)?,
        });
    }

    let classifier = PerformanceClassifier::new(table);
    let mut families = Vec::with_capacity(config.families.len());
    for spec in &config.families {
        let members = spec
            .members
            .iter()
            .map(|m| Ok((m.key.clone(), member_label(&m.key, &m.branch)?)))
            .collect::<LensResult<Vec<_>>>()?;
        let outcome = classifier.classify(&members, &spec.metric_column, spec.threshold)?;
        families.push(FamilyReport {
            family: spec.name.clone(),
            metric_column: spec.metric_column.clone(),
            threshold: spec.threshold,
            outcome,
        });
    }

    Ok(DashboardReport {
        months,
        service_count: table.len(),
        branches,
        families,
    })
}

/// Run the whole pipeline for one workbook: open, normalize, report.
pub fn analyze_file(path: &Path, config: &DashboardConfig) -> LensResult<DashboardReport> {
    let sheet = SheetReader::new(path, &config.sheet_name).read()?;
    let table = normalize(&sheet)?;
    build_report(&table, config)
}

/// Display label for a family member: base service name (suffix stripped,
/// original case) plus the branch it came from.
fn member_label(key: &str, branch: &str) -> LensResult<String> {
    Ok(format!("{} ({})", strip_branch_suffix(key)?, branch))
}
