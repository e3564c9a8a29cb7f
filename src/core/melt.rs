//! Trend melting: wide per-branch rows → long-format observations
//!
//! For each requested service key that resolves, one observation per month in
//! chronological order; keys that don't resolve contribute nothing. Series
//! labels collapse branch-suffixed keys back to one human-readable name —
//! a display-only transform that must not be used to re-identify the branch.

use crate::core::months::coerce_numeric;
use crate::core::normalize::strip_branch_suffix;
use crate::core::resolve::resolve_service;
use crate::error::LensResult;
use crate::types::{Month, NormalizedTable, Observation};

/// Melts a set of named services' wide rows against a sorted month axis.
pub struct TrendMelter<'a> {
    table: &'a NormalizedTable,
    months: &'a [Month],
}

impl<'a> TrendMelter<'a> {
    pub fn new(table: &'a NormalizedTable, months: &'a [Month]) -> Self {
        Self { table, months }
    }

    /// Melt the given service keys into observations, globally sorted by
    /// calendar month. Missing cells melt to `value: None`, never zero.
    pub fn melt(&self, keys: &[String]) -> LensResult<Vec<Observation>> {
        let mut observations = Vec::new();
        for key in keys {
            let Some(row) = resolve_service(self.table, key)? else {
                continue;
            };
            let service = display_label(key)?;
            for month in self.months {
                observations.push(Observation {
                    service: service.clone(),
                    month: month.clone(),
                    value: coerce_numeric(row.cell(&month.label)),
                });
            }
        }
        // Stable sort: within a month, series keep the caller's key order.
        observations.sort_by_key(|obs| obs.month.date);
        Ok(observations)
    }
}

/// Human-readable series label for a service key: branch suffix stripped,
/// title case applied, so `BLOOD PRESSURE_2` and `Blood Pressure` both read
/// "Blood Pressure" in a comparison legend.
pub fn display_label(key: &str) -> LensResult<String> {
    Ok(title_case(&strip_branch_suffix(key)?))
}

/// Word-wise capitalization: an alphabetic character is uppercased when it
/// follows a non-alphabetic character, lowercased otherwise.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
