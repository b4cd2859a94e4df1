//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "gnigen.toml")
    }
}

impl Manifest {
    /// Parse a gnigen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a gnigen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);
    let mut destinations = HashSet::new();

    for export in &manifest.exports {
        ctx.validate_gni_path(&export.gni)?;
        if !destinations.insert(export.gni.as_str()) {
            return Err(ctx.source_context().validation_error(
                format!("'{}' is exported more than once", export.gni),
                ctx.find_last_string_span(&export.gni),
            ));
        }

        let export_ctx = ctx.push(&export.gni);
        if export.vars.is_empty() {
            return Err(ctx.source_context().validation_error(
                format!("'{}' declares no variables", export.gni),
                ctx.find_string_span(&export.gni),
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        for var in &export.vars {
            export_ctx.validate_variable(&var.var)?;
            if seen.contains(&var.var.as_str()) {
                return Err(export_ctx.duplicate_variable(&var.var, &export.gni));
            }
            seen.push(&var.var);

            let var_ctx = export_ctx.push(&var.var);
            for rule in &var.rules {
                var_ctx.validate_rule_label(rule)?;
            }
        }
    }
    Ok(())
}
