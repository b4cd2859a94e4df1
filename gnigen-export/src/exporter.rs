//! The exporter facade: query, resolve, render, then write or compare.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use gnigen_core::{FileSystem, QueryCommand, join_workspace_path};
use gnigen_manifest::{GniExportDesc, GniFileListExportDesc, Manifest};

use crate::{
    Error, Result,
    check::{compare_blocks, describe_status, extract_variable_blocks, is_gn_identifier},
    filter::{file_list_contains_only_cpp_header_files, filter_deprecated_files, find_duplicate},
    label::{add_gni_variables_to_workspace_paths, convert_targets_to_file_paths},
    query::QueryResult,
    render::{RenderedFile, RenderedVariable, render_gni},
};

/// Everything the exporter needs to know up front.
#[derive(Debug, Clone)]
pub struct ExporterParams {
    /// Base directory for every generated file
    pub workspace_dir: PathBuf,
    /// Files to generate, in order
    pub export_descs: Vec<GniExportDesc>,
}

impl ExporterParams {
    pub fn new(workspace_dir: impl Into<PathBuf>, export_descs: Vec<GniExportDesc>) -> Self {
        Self {
            workspace_dir: workspace_dir.into(),
            export_descs,
        }
    }

    /// Build params from a parsed manifest and an already-resolved workspace root.
    pub fn from_manifest(manifest: &Manifest, workspace_dir: impl Into<PathBuf>) -> Self {
        Self::new(workspace_dir, manifest.exports.clone())
    }
}

/// Generates `.gni` files from a build-graph query.
///
/// Holds no state between calls; each [`export`](Self::export) or
/// [`check_current`](Self::check_current) runs the query afresh.
pub struct GniExporter<F> {
    params: ExporterParams,
    fs: F,
}

impl<F: FileSystem> GniExporter<F> {
    pub fn new(params: ExporterParams, fs: F) -> Self {
        Self { params, fs }
    }

    pub fn params(&self) -> &ExporterParams {
        &self.params
    }

    /// Absolute path of a workspace-relative path.
    pub fn workspace_to_abs_path(&self, rel: &str) -> PathBuf {
        join_workspace_path(&self.params.workspace_dir, rel)
    }

    /// Render every file in memory without touching the file system.
    pub fn render(&self, query: &dyn QueryCommand) -> Result<Vec<RenderedFile>> {
        let qr = run_query(query)?;
        self.params
            .export_descs
            .iter()
            .map(|desc| self.render_file(&qr, desc))
            .collect()
    }

    /// Render and write every file.
    ///
    /// Files are written one at a time; an error stops the batch but leaves
    /// files written before it in place.
    pub fn export(&self, query: &dyn QueryCommand) -> Result<Vec<RenderedFile>> {
        let qr = run_query(query)?;
        let mut written = Vec::with_capacity(self.params.export_descs.len());

        for desc in &self.params.export_descs {
            let file = self.render_file(&qr, desc)?;
            self.fs
                .write_file(&file.path, file.content.as_bytes())
                .map_err(|source| Error::Io {
                    path: file.path.clone(),
                    source,
                })?;
            tracing::info!(gni = %file.gni, vars = file.variables.len(), "wrote");
            written.push(file);
        }

        Ok(written)
    }

    /// Compare every file on disk against what [`export`](Self::export) would write.
    ///
    /// Returns the number of out-of-date variables; a description of each is
    /// written to `report`. Nothing is written to the file system. Only the
    /// variable blocks are compared, so the existing file must keep
    /// assignments at column zero.
    pub fn check_current(&self, query: &dyn QueryCommand, report: &mut dyn Write) -> Result<usize> {
        let qr = run_query(query)?;
        let mut out_of_date = 0;

        for desc in &self.params.export_descs {
            let file = self.render_file(&qr, desc)?;
            let existing = self.read_existing(&file.path)?;

            let expected_blocks = extract_variable_blocks(&file.content);
            let existing_blocks = extract_variable_blocks(&existing);

            for var in &file.variables {
                let expected = expected_blocks.get(&var.name).ok_or_else(|| {
                    Error::InvalidVariable {
                        var: var.name.clone(),
                        gni: file.gni.clone(),
                    }
                })?;
                let status = compare_blocks(expected, existing_blocks.get(&var.name));
                if status.is_current() {
                    continue;
                }

                out_of_date += 1;
                tracing::warn!(gni = %file.gni, var = %var.name, "out of date");
                for line in describe_status(&file.gni, &var.name, &status) {
                    writeln!(report, "{line}").map_err(Error::Report)?;
                }
            }
        }

        Ok(out_of_date)
    }

    fn read_existing(&self, path: &Path) -> Result<String> {
        let bytes = self.fs.read_file(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn render_file(&self, qr: &QueryResult, desc: &GniExportDesc) -> Result<RenderedFile> {
        let _span = tracing::debug_span!("export", gni = %desc.gni).entered();

        let variables = desc
            .vars
            .iter()
            .map(|var| {
                if !is_gn_identifier(&var.var) {
                    return Err(Error::InvalidVariable {
                        var: var.var.clone(),
                        gni: desc.gni.clone(),
                    });
                }
                render_variable(qr, var)
            })
            .collect::<Result<Vec<_>>>()?;
        let content = render_gni(&desc.gni, &variables, &desc.footer);

        Ok(RenderedFile {
            gni: desc.gni.clone(),
            path: self.workspace_to_abs_path(&desc.gni),
            variables,
            content,
        })
    }
}

fn run_query(query: &dyn QueryCommand) -> Result<QueryResult> {
    let bytes = query.read().map_err(Error::Query)?;
    QueryResult::decode(&bytes)
}

/// Resolve one variable: merge rule sources, convert, filter, validate, root.
fn render_variable(qr: &QueryResult, desc: &GniFileListExportDesc) -> Result<RenderedVariable> {
    let labels = rule_sources(qr, desc)?;
    let paths = filter_deprecated_files(&convert_targets_to_file_paths(&labels)?);

    if let Some(dup) = find_duplicate(&paths) {
        return Err(Error::DuplicateSource {
            path: dup.to_string(),
            var: desc.var.clone(),
        });
    }

    let headers_only = file_list_contains_only_cpp_header_files(&paths);
    let paths = add_gni_variables_to_workspace_paths(&paths)?;
    tracing::debug!(var = %desc.var, files = paths.len(), headers_only, "resolved");

    Ok(RenderedVariable {
        name: desc.var.clone(),
        paths,
        headers_only,
    })
}

/// Concatenate the source labels of every rule, in declaration order.
fn rule_sources<'q>(qr: &'q QueryResult, desc: &GniFileListExportDesc) -> Result<Vec<&'q str>> {
    let mut labels = Vec::new();
    for rule_name in &desc.rules {
        let rule = qr.rule(rule_name).ok_or_else(|| Error::UnknownRule {
            rule: rule_name.clone(),
            var: desc.var.clone(),
        })?;
        labels.extend(rule.srcs.iter().map(String::as_str));
    }
    Ok(labels)
}
