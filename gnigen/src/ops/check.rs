//! Check operation - compare generated files on disk with a fresh render.

use std::path::Path;

use gnigen_core::{OsFileSystem, QueryCommand};
use gnigen_export::{ExporterParams, GniExporter, Result};
use gnigen_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Nothing is written. Descriptions of stale variables are collected into
/// the report.
pub fn check(
    manifest: &Manifest,
    config_path: &Path,
    query: &dyn QueryCommand,
    workspace_dir: &Path,
) -> Result<CheckReport> {
    let exporter = GniExporter::new(
        ExporterParams::from_manifest(manifest, workspace_dir),
        OsFileSystem::new(),
    );

    let mut details: Vec<u8> = Vec::new();
    let out_of_date = exporter.check_current(query, &mut details)?;

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        files_checked: manifest.exports.len(),
        out_of_date,
        details: String::from_utf8_lossy(&details)
            .lines()
            .map(str::to_string)
            .collect(),
    })
}
