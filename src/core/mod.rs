//! Core reshape/extraction pipeline
//!
//! Raw sheet → header location → normalization/disambiguation → month
//! classification → {resolution feeding melting and performance
//! classification}. Every stage is a pure derivation; nothing here mutates
//! shared state or touches the filesystem.

pub mod header;
pub mod melt;
pub mod months;
pub mod normalize;
pub mod performance;
pub mod resolve;

pub use header::locate_header_row;
pub use melt::TrendMelter;
pub use months::month_columns;
pub use normalize::normalize;
pub use performance::{FamilyOutcome, PerformanceClassifier, PerformanceEntry, PerformanceStatus};
pub use resolve::resolve_service;
