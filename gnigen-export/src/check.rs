//! Comparison of existing `.gni` text against freshly rendered text.
//!
//! This is not a GN parser. It relies on the layout `gn format` and the
//! renderer produce: every list assignment starts at column zero with
//! `name = [` and its block ends at the first line ending in `]`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static LIST_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\[").expect("valid regex"));

/// Name of the variable a line assigns a list to, if it opens one.
///
/// Indented lines and comments never match.
pub fn get_gni_line_variable(line: &str) -> Option<&str> {
    LIST_ASSIGNMENT
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Every list assignment in `text`, keyed by variable, in file order.
///
/// Each block holds the opening line through the closing `]` line, with
/// trailing whitespace removed. If a variable is assigned twice the first
/// block wins.
pub fn extract_variable_blocks(text: &str) -> IndexMap<String, Vec<String>> {
    let mut blocks: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let Some(name) = get_gni_line_variable(line) else {
            continue;
        };

        let mut block = vec![line.trim_end().to_string()];
        if !line.trim_end().ends_with(']') {
            for next in lines.by_ref() {
                let next = next.trim_end();
                block.push(next.to_string());
                if next.ends_with(']') {
                    break;
                }
            }
        }

        blocks.entry(name.to_string()).or_insert(block);
    }
    blocks
}

/// Result of comparing one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableStatus {
    /// The existing block matches.
    Current,
    /// The existing file does not assign the variable.
    Missing,
    /// The existing block differs.
    Stale {
        /// Entries that should be present but are not
        added: Vec<String>,
        /// Entries present that should not be
        removed: Vec<String>,
    },
}

impl VariableStatus {
    pub fn is_current(&self) -> bool {
        matches!(self, VariableStatus::Current)
    }
}

/// Compare an expected block against the existing one, if any.
///
/// Blocks listing the same entries in the same order are current even when
/// laid out differently, e.g. a one-element list collapsed onto one line.
pub fn compare_blocks(expected: &[String], existing: Option<&Vec<String>>) -> VariableStatus {
    let Some(existing) = existing else {
        return VariableStatus::Missing;
    };
    if expected == existing.as_slice() {
        return VariableStatus::Current;
    }

    let expected_entries = block_entries(expected);
    let existing_entries = block_entries(existing);
    if expected_entries == existing_entries {
        return VariableStatus::Current;
    }
    VariableStatus::Stale {
        added: difference(&expected_entries, &existing_entries),
        removed: difference(&existing_entries, &expected_entries),
    }
}

/// Whether the checker can find a list assigned to `name`.
pub fn is_gn_identifier(name: &str) -> bool {
    get_gni_line_variable(&format!("{name} = [")) == Some(name)
}

/// Describe a status the way the check report prints it.
pub fn describe_status(gni: &str, var: &str, status: &VariableStatus) -> Vec<String> {
    match status {
        VariableStatus::Current => Vec::new(),
        VariableStatus::Missing => vec![format!("{gni}: '{var}' is missing")],
        VariableStatus::Stale { added, removed } => {
            let mut lines = vec![format!("{gni}: '{var}' is out of date")];
            lines.extend(removed.iter().map(|entry| format!("  - {entry}")));
            lines.extend(added.iter().map(|entry| format!("  + {entry}")));
            if added.is_empty() && removed.is_empty() {
                lines.push("  entries are reordered".to_string());
            }
            lines
        }
    }
}

/// List entries of a block, each normalized to `"path",`.
///
/// Entries are read from the text between the opening `[` and the closing
/// `]`, so one-line blocks and unterminated blocks keep every entry.
fn block_entries(block: &[String]) -> Vec<String> {
    let text = block.join("\n");
    let Some((_, body)) = text.split_once('[') else {
        return Vec::new();
    };
    let terminated = block.last().is_some_and(|line| line.ends_with(']'));
    let body = match body.rsplit_once(']') {
        Some((inner, _)) if terminated => inner,
        _ => body,
    };

    body.split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| format!("{entry},"))
        .collect()
}

fn difference(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .filter(|entry| !right.contains(entry))
        .cloned()
        .collect()
}
