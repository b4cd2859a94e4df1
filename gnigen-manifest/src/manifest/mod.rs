//! Manifest types and parsing for gnigen.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::GnigenToml;
use serde::Deserialize;
pub use validate::ParseContext;

/// Root manifest for gnigen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Workspace root, relative to the manifest's directory
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// How the build graph is queried
    #[serde(default)]
    pub query: QueryConfig,

    /// Generated files, in the order they are produced
    #[serde(default, rename = "export")]
    pub exports: Vec<GniExportDesc>,
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

/// `[query]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Executable used to run the query
    #[serde(default = "default_command")]
    pub command: String,

    /// Query expression; defaults to the set of every exported rule
    #[serde(default)]
    pub expression: Option<String>,
}

fn default_command() -> String {
    "bazel".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            expression: None,
        }
    }
}

/// One generated `.gni` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GniExportDesc {
    /// Workspace-relative destination
    pub gni: String,

    /// File lists written to the destination, in order
    #[serde(default)]
    pub vars: Vec<GniFileListExportDesc>,

    /// Literal lines appended after the file lists
    #[serde(default)]
    pub footer: Vec<String>,
}

/// One GN variable and the rules whose sources it lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GniFileListExportDesc {
    pub var: String,
    #[serde(default)]
    pub rules: Vec<String>,
}

impl GniExportDesc {
    pub fn new(gni: impl Into<String>) -> Self {
        Self {
            gni: gni.into(),
            vars: Vec::new(),
            footer: Vec::new(),
        }
    }

    /// Add a variable listing the sources of `rules`.
    pub fn var<I, S>(mut self, var: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vars.push(GniFileListExportDesc {
            var: var.into(),
            rules: rules.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Append a literal footer line.
    pub fn footer_line(mut self, line: impl Into<String>) -> Self {
        self.footer.push(line.into());
        self
    }
}

impl Manifest {
    /// Every rule named by any export, first occurrence first.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in self
            .exports
            .iter()
            .flat_map(|e| &e.vars)
            .flat_map(|v| &v.rules)
        {
            if !names.contains(&rule.as_str()) {
                names.push(rule);
            }
        }
        names
    }

    /// The query expression to run.
    pub fn query_expression(&self) -> String {
        match &self.query.expression {
            Some(expr) => expr.clone(),
            None => format!("set({})", self.rule_names().join(" ")),
        }
    }
}
