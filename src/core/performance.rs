//! Aggregate performance classification
//!
//! Each service family compares one aggregate metric (an "Average PCM"
//! column) across branches against a single threshold. Services whose metric
//! is blank or unparsable contribute no entry — a missing average is not a
//! zero average.

use crate::core::months::coerce_numeric;
use crate::core::resolve::resolve_service;
use crate::error::LensResult;
use crate::types::NormalizedTable;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    Underperforming,
    PerformingWell,
}

/// One classified service: rounded metric value plus its status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceEntry {
    pub key: String,
    pub label: String,
    /// Metric rounded to the nearest integer for display.
    pub value: i64,
    pub status: PerformanceStatus,
}

/// Family-level result: classified entries in input order, or an explicit
/// no-data signal when no member produced a metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyOutcome {
    Classified(Vec<PerformanceEntry>),
    NoData,
}

/// Classifies aggregate metrics against per-family thresholds.
pub struct PerformanceClassifier<'a> {
    table: &'a NormalizedTable,
}

impl<'a> PerformanceClassifier<'a> {
    pub fn new(table: &'a NormalizedTable) -> Self {
        Self { table }
    }

    /// Classify each (key, display label) member: resolve the row, parse the
    /// metric column, round, and compare against the threshold. Members that
    /// do not resolve or whose metric is absent are skipped. Entry order
    /// follows `members` order.
    pub fn classify(
        &self,
        members: &[(String, String)],
        metric_column: &str,
        threshold: f64,
    ) -> LensResult<FamilyOutcome> {
        let mut entries = Vec::new();
        for (key, label) in members {
            let Some(row) = resolve_service(self.table, key)? else {
                continue;
            };
            let Some(metric) = coerce_numeric(row.cell(metric_column)) else {
                continue;
            };
            let value = metric.round() as i64;
            let status = if (value as f64) < threshold {
                PerformanceStatus::Underperforming
            } else {
                PerformanceStatus::PerformingWell
            };
            entries.push(PerformanceEntry {
                key: key.clone(),
                label: label.clone(),
                value,
                status,
            });
        }
        if entries.is_empty() {
            Ok(FamilyOutcome::NoData)
        } else {
            Ok(FamilyOutcome::Classified(entries))
        }
    }
}
