//! Decoding of `bazel query --output=jsonproto` results.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result};

/// Kind of a query target. Only [`TargetKind::Rule`] carries sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    Rule,
    SourceFile,
    GeneratedFile,
    PackageGroup,
    EnvironmentGroup,
    #[serde(other)]
    Other,
}

/// A build rule and the source files it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Fully qualified label, e.g. `//src/core:core_srcs`
    pub name: String,
    /// Rule class, e.g. `filegroup`
    pub rule_class: String,
    /// Where the rule is declared, when bazel reports it
    pub location: Option<String>,
    /// Labels of owned sources: `srcs` followed by `hdrs`
    pub srcs: Vec<String>,
}

/// One entry of the query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: TargetKind,
    pub rule: Option<Rule>,
}

/// Decoded query result.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    targets: Vec<Target>,
    /// Rule name to index in `targets`
    rules: IndexMap<String, usize>,
}

impl QueryResult {
    /// Decode the raw bytes produced by the query command.
    ///
    /// Only the shape of the data is checked; rules are not cross-referenced.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let raw: RawQueryResult = serde_json::from_slice(bytes).map_err(Error::Decode)?;
        Ok(raw.target.into_iter().map(Target::from).collect())
    }

    /// All targets, in query order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Rule targets, in query order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules
            .values()
            .filter_map(|&index| self.targets[index].rule.as_ref())
    }

    /// Look up a rule by its label.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules
            .get(name)
            .and_then(|&index| self.targets[index].rule.as_ref())
    }
}

impl FromIterator<Target> for QueryResult {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut result = QueryResult::default();
        for target in iter {
            if let Some(rule) = target.rule.as_ref().filter(|_| target.kind == TargetKind::Rule) {
                result.rules.insert(rule.name.clone(), result.targets.len());
            }
            result.targets.push(target);
        }
        result
    }
}

// Wire format. Field names follow the proto3 JSON mapping of
// blaze_query.QueryResult; unknown fields are ignored.

#[derive(Debug, Deserialize)]
struct RawQueryResult {
    #[serde(default)]
    target: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(rename = "type")]
    kind: TargetKind,
    #[serde(default)]
    rule: Option<RawRule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    name: String,
    #[serde(default)]
    rule_class: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    attribute: Vec<RawAttribute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttribute {
    name: String,
    #[serde(default)]
    string_list_value: Vec<String>,
}

const SOURCE_ATTRIBUTES: &[&str] = &["srcs", "hdrs"];

impl From<RawTarget> for Target {
    fn from(raw: RawTarget) -> Self {
        Self {
            kind: raw.kind,
            rule: raw.rule.map(Rule::from),
        }
    }
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        let mut srcs = Vec::new();
        for attr_name in SOURCE_ATTRIBUTES {
            for attr in raw.attribute.iter().filter(|a| a.name == *attr_name) {
                srcs.extend(attr.string_list_value.iter().cloned());
            }
        }

        Self {
            name: raw.name,
            rule_class: raw.rule_class,
            location: raw.location,
            srcs,
        }
    }
}
