//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the manifest text, its filename and the current path through the
/// manifest (e.g. `gn/core.gni.skia_core_sources`) so errors can say where
/// they happened.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "gnigen.toml");
/// let export = ctx.push("gn/core.gni");
/// export.validate_variable("skia_core_sources")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "rule in 'gn/core.gni.skia_core_sources'" or just "rule".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Span of the first quoted occurrence of `value`.
    pub fn find_string_span(&self, value: &str) -> Option<SourceSpan> {
        string_spans(self.src(), value).next()
    }

    /// Span of the last quoted occurrence of `value`.
    pub fn find_last_string_span(&self, value: &str) -> Option<SourceSpan> {
        string_spans(self.src(), value).last()
    }

    /// Validate that a name can be used as a GN variable.
    pub fn validate_variable(&self, name: &str) -> Result<()> {
        match validate_gn_identifier(name) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for("variable"),
                reason,
                self.find_string_span(name),
            )),
        }
    }

    /// Validate that `label` has the `//package:name` shape.
    pub fn validate_rule_label(&self, label: &str) -> Result<()> {
        if is_rule_label(label) {
            Ok(())
        } else {
            Err(self.source.invalid_label_error(
                label,
                self.context_for("rule"),
                self.find_string_span(label),
            ))
        }
    }

    /// Validate a destination path: relative, non-empty, ending in `.gni`.
    pub fn validate_gni_path(&self, gni: &str) -> Result<()> {
        let reason = if gni.is_empty() {
            Some("export destination cannot be empty")
        } else if gni.starts_with('/') || gni.starts_with('\\') {
            Some("export destination must be relative to the workspace")
        } else if !gni.ends_with(".gni") {
            Some("export destination must be a .gni file")
        } else {
            None
        };

        match reason {
            None => Ok(()),
            Some(reason) => Err(self
                .source
                .validation_error(format!("{reason}: '{gni}'"), self.find_string_span(gni))),
        }
    }

    /// Error for a variable declared twice in the current export.
    pub fn duplicate_variable(&self, var: &str, gni: &str) -> Box<Error> {
        let mut spans = string_spans(self.src(), var);
        let first = spans.next();
        let second = spans.next();
        self.source.duplicate_variable_error(var, gni, first, second)
    }
}

/// Spans of the text inside every `"value"` or `'value'` in `src`.
fn string_spans<'s>(src: &'s str, value: &'s str) -> impl Iterator<Item = SourceSpan> + 's {
    let len = value.len();
    src.char_indices().filter_map(move |(pos, c)| {
        if c != '"' && c != '\'' {
            return None;
        }
        let rest = &src[pos + 1..];
        let matches = rest.starts_with(value) && rest[len..].starts_with(c);
        matches.then(|| SourceSpan::from((pos + 1, len)))
    })
}

/// Validate that a name is a GN identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_gn_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name contains invalid characters");
    }

    None
}

/// Whether `label` looks like `//package:name` (the package may be empty).
pub(crate) fn is_rule_label(label: &str) -> bool {
    let Some(rest) = label.strip_prefix("//") else {
        return false;
    };
    match rest.split_once(':') {
        Some((package, name)) => !name.is_empty() && !package.starts_with('/'),
        None => false,
    }
}
