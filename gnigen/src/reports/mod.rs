//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod export;
mod output;

pub use check::CheckReport;
pub use export::{ExportReport, FileSummary, VariableSummary};
pub use output::{Report, TerminalOutput};
