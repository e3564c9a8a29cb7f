//! Header row location
//!
//! PCC exports bury the real column header a few rows down, underneath titles
//! and blank spacer rows. The header is the first row that carries at least
//! one `Mon-YY` month token; everything above it is discarded.

use crate::core::months::month_regex;
use crate::error::{LensError, LensResult};
use crate::types::RawSheet;

/// Scan rows top-to-bottom and return the index of the first row containing a
/// month-token cell. Fails with `HeaderNotFound` when no row qualifies —
/// fatal for the whole pipeline.
pub fn locate_header_row(sheet: &RawSheet) -> LensResult<usize> {
    let re = month_regex()?;
    for (idx, row) in sheet.rows().iter().enumerate() {
        let has_month_token = row
            .iter()
            .any(|cell| re.is_match(cell.to_display_string().trim()));
        if has_month_token {
            return Ok(idx);
        }
    }
    Err(LensError::HeaderNotFound)
}
