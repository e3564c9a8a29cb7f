//! Excel input module
//!
//! Opens a PCC workbook export and hands the core an owned, untyped grid.
//! Everything `calamine`-specific stays behind this boundary.

mod reader;

pub use reader::SheetReader;
