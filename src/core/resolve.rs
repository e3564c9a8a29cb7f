//! Service row resolution
//!
//! Lookups are forgiving about case and surrounding whitespace on both sides,
//! because keys arrive from config files and hand-maintained branch lists.
//! A miss is a legitimate, displayable state; two hits mean disambiguation
//! failed upstream and must abort loudly.

use crate::error::{LensError, LensResult};
use crate::types::{NormalizedTable, ServiceRow};

/// Find the row for a (possibly branch-suffixed) service key.
///
/// Returns `Ok(None)` when the service is not present in this upload — the
/// caller renders a warning, siblings keep processing. More than one match
/// violates the post-disambiguation uniqueness invariant and is an internal
/// error, never silently resolved by taking the first.
pub fn resolve_service<'a>(
    table: &'a NormalizedTable,
    key: &str,
) -> LensResult<Option<&'a ServiceRow>> {
    let needle = key.trim().to_uppercase();
    let mut found: Option<&ServiceRow> = None;
    for row in &table.rows {
        if row.key.trim().to_uppercase() == needle {
            if found.is_some() {
                return Err(LensError::DuplicateKey(key.trim().to_string()));
            }
            found = Some(row);
        }
    }
    Ok(found)
}
