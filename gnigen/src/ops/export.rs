//! Export operation - write or preview every generated file.

use std::path::Path;

use gnigen_core::{OsFileSystem, QueryCommand};
use gnigen_export::{ExporterParams, GniExporter, RenderedFile, Result};
use gnigen_manifest::Manifest;

use crate::reports::{ExportReport, FileSummary, VariableSummary};

/// Options for the export operation.
pub struct ExportOptions<'a> {
    /// Directory generated paths are relative to.
    pub workspace_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the export operation.
pub fn export(
    manifest: &Manifest,
    query: &dyn QueryCommand,
    opts: ExportOptions,
) -> Result<ExportReport> {
    let exporter = GniExporter::new(
        ExporterParams::from_manifest(manifest, opts.workspace_dir),
        OsFileSystem::new(),
    );

    let files = if opts.dry_run {
        exporter.render(query)?
    } else {
        exporter.export(query)?
    };

    Ok(ExportReport {
        dry_run: opts.dry_run,
        files: files.into_iter().map(summarize).collect(),
    })
}

fn summarize(file: RenderedFile) -> FileSummary {
    FileSummary {
        gni: file.gni,
        variables: file
            .variables
            .iter()
            .map(|var| VariableSummary {
                name: var.name.clone(),
                file_count: var.paths.len(),
                headers_only: var.headers_only,
            })
            .collect(),
        content: file.content,
    }
}
