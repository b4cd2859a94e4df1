//! Rendering of `.gni` file text.

use std::path::{Path, PathBuf};

use crate::label::{ROOT_DIRS, ROOT_VARIABLE_MARKER, root_of_gni_path};

/// Comment lines at the top of every generated file.
pub const GENERATED_FILE_BANNER: &[&str] = &[
    "# DO NOT EDIT: This is a generated file.",
    "# See //bazel/exporter_tool/README.md for more information.",
];

const INDENT: &str = "  ";

/// Fluent builder for GN text with two-space indentation.
///
/// # Example
///
/// ```
/// use gnigen_export::GniBuilder;
///
/// let text = GniBuilder::new()
///     .block_with_close("foo = [", "]", |b| b.line("\"$_src/a.cpp\","))
///     .build();
///
/// assert_eq!(text, "foo = [\n  \"$_src/a.cpp\",\n]\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GniBuilder {
    indent_level: usize,
    buffer: String,
}

impl GniBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Add several lines.
    pub fn lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .fold(self, |builder, line| builder.line(line.as_ref()))
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add an indented block between `header` and `close`.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally apply a transformation.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Apply a transformation for each item.
    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    /// Consume the builder and return the text.
    pub fn build(self) -> String {
        self.buffer
    }
}

/// A GN variable with its final list of root-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedVariable {
    pub name: String,
    /// Paths like `$_src/core/SkAAClip.cpp`, in rule-then-file order
    pub paths: Vec<String>,
    /// Every path is a C/C++ header
    pub headers_only: bool,
}

impl RenderedVariable {
    /// Emit `name = [ ... ]`.
    pub fn render(&self, builder: GniBuilder) -> GniBuilder {
        if self.paths.is_empty() {
            return builder.line(&format!("{} = []", self.name));
        }
        builder.block_with_close(&format!("{} = [", self.name), "]", |b| {
            b.each(&self.paths, |b, path| b.line(&format!("\"{path}\",")))
        })
    }
}

/// A generated file, ready to write or compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Workspace-relative destination
    pub gni: String,
    /// Absolute destination
    pub path: PathBuf,
    pub variables: Vec<RenderedVariable>,
    pub content: String,
}

/// Render the full text of a `.gni` file.
///
/// Layout: banner, blank line, one prologue line per root in use, blank line,
/// variable blocks separated by blank lines, then the footer (if any) after a
/// blank line.
pub fn render_gni(gni: &str, variables: &[RenderedVariable], footer: &[String]) -> String {
    let roots = used_roots(variables);
    let depth = gni_depth(gni);

    GniBuilder::new()
        .lines(GENERATED_FILE_BANNER)
        .blank()
        .when(!roots.is_empty(), |b| {
            b.each(&roots, |b, root| b.line(&root_prologue_line(root, depth)))
                .blank()
        })
        .each(variables.iter().enumerate(), |b, (i, var)| {
            var.render(b.when(i > 0, GniBuilder::blank))
        })
        .when(!footer.is_empty(), |b| b.blank().lines(footer))
        .build()
}

/// `_src = get_path_info("../src", "abspath")` for a file `depth` directories deep.
pub fn root_prologue_line(root: &str, depth: usize) -> String {
    let variable = ROOT_VARIABLE_MARKER.trim_start_matches('$');
    format!(
        "{variable}{root} = get_path_info(\"{}{root}\", \"abspath\")",
        "../".repeat(depth)
    )
}

/// Roots referenced by any variable, in [`ROOT_DIRS`] order.
fn used_roots(variables: &[RenderedVariable]) -> Vec<&'static str> {
    let used: Vec<&'static str> = variables
        .iter()
        .flat_map(|v| &v.paths)
        .filter_map(|p| root_of_gni_path(p))
        .collect();
    ROOT_DIRS
        .iter()
        .copied()
        .filter(|root| used.contains(root))
        .collect()
}

/// Number of directories between the workspace root and the file.
fn gni_depth(gni: &str) -> usize {
    Path::new(gni)
        .parent()
        .map(|dir| dir.components().count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, paths: &[&str]) -> RenderedVariable {
        RenderedVariable {
            name: name.to_string(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
            headers_only: false,
        }
    }

    #[test]
    fn test_builder_indentation() {
        let text = GniBuilder::new()
            .line("a")
            .indent()
            .line("b")
            .indent()
            .line("c")
            .dedent()
            .dedent()
            .dedent()
            .line("d")
            .build();
        assert_eq!(text, "a\n  b\n    c\nd\n");
    }

    #[test]
    fn test_render_variable() {
        let text = var("foo", &["$_src/a.cpp", "$_src/b.cpp"])
            .render(GniBuilder::new())
            .build();
        assert_eq!(text, "foo = [\n  \"$_src/a.cpp\",\n  \"$_src/b.cpp\",\n]\n");
    }

    #[test]
    fn test_render_empty_variable() {
        let text = var("foo", &[]).render(GniBuilder::new()).build();
        assert_eq!(text, "foo = []\n");
    }

    #[test]
    fn test_root_prologue_line() {
        assert_eq!(
            root_prologue_line("src", 1),
            r#"_src = get_path_info("../src", "abspath")"#
        );
        assert_eq!(
            root_prologue_line("include", 0),
            r#"_include = get_path_info("include", "abspath")"#
        );
        assert_eq!(
            root_prologue_line("modules", 2),
            r#"_modules = get_path_info("../../modules", "abspath")"#
        );
    }

    #[test]
    fn test_gni_depth() {
        assert_eq!(gni_depth("core.gni"), 0);
        assert_eq!(gni_depth("gn/core.gni"), 1);
        assert_eq!(gni_depth("modules/skottie/skottie.gni"), 2);
    }

    #[test]
    fn test_used_roots_in_table_order() {
        let vars = [
            var("a", &["$_modules/m.cpp", "$_src/s.cpp"]),
            var("b", &["$_src/t.cpp"]),
        ];
        assert_eq!(used_roots(&vars), ["src", "modules"]);
    }

    #[test]
    fn test_render_gni_multiple_variables_and_footer() {
        let vars = [
            var("skia_core_public", &["$_include/core/SkColor.h"]),
            var("skia_core_sources", &["$_src/core/SkAAClip.cpp"]),
        ];
        let footer = vec![
            "skia_core_sources += skia_pathops_sources".to_string(),
            String::new(),
            "skia_core_public += skia_pathops_public".to_string(),
        ];

        let text = render_gni("gn/core.gni", &vars, &footer);

        insta::assert_snapshot!(text, @r#"
        # DO NOT EDIT: This is a generated file.
        # See //bazel/exporter_tool/README.md for more information.

        _src = get_path_info("../src", "abspath")
        _include = get_path_info("../include", "abspath")

        skia_core_public = [
          "$_include/core/SkColor.h",
        ]

        skia_core_sources = [
          "$_src/core/SkAAClip.cpp",
        ]

        skia_core_sources += skia_pathops_sources

        skia_core_public += skia_pathops_public
        "#);
    }

    #[test]
    fn test_render_gni_without_paths_has_no_prologue() {
        let text = render_gni("gn/empty.gni", &[var("empty", &[])], &[]);
        assert_eq!(
            text,
            "# DO NOT EDIT: This is a generated file.\n\
             # See //bazel/exporter_tool/README.md for more information.\n\
             \n\
             empty = []\n"
        );
    }
}
