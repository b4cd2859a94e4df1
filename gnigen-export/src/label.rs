//! Conversion of bazel labels into workspace paths and GN root-variable paths.

use crate::{Error, Result};

/// Top-level source directories that have a root variable in generated files.
pub const ROOT_DIRS: &[&str] = &["src", "include", "modules"];

/// Prefix that turns a root directory name into its GN variable (`$_src`).
pub const ROOT_VARIABLE_MARKER: &str = "$_";

/// Convert a file label (`//pkg/path:name`) into a workspace path (`pkg/path/name`).
pub fn convert_target_to_file_path(label: &str) -> Result<String> {
    let malformed = |reason| Error::MalformedLabel {
        label: label.to_string(),
        reason,
    };

    if label.is_empty() {
        return Err(malformed("label is empty"));
    }
    let rest = label
        .strip_prefix("//")
        .ok_or_else(|| malformed("label must start with '//'"))?;
    let (package, name) = rest
        .split_once(':')
        .ok_or_else(|| malformed("label has no ':' separator"))?;
    if package.is_empty() {
        return Err(malformed("package is empty"));
    }
    if name.is_empty() {
        return Err(malformed("file name is empty"));
    }

    Ok(format!("{package}/{name}"))
}

/// Convert every label, preserving order. Stops at the first malformed label.
pub fn convert_targets_to_file_paths<S: AsRef<str>>(labels: &[S]) -> Result<Vec<String>> {
    labels
        .iter()
        .map(|label| convert_target_to_file_path(label.as_ref()))
        .collect()
}

/// First `/`-delimited segment of `path`.
///
/// Absolute paths, and paths made only of separators, have no top-level
/// folder and yield `""`.
pub fn extract_top_level_folder(path: &str) -> &str {
    if path.starts_with('/') {
        return "";
    }
    match path.split_once('/') {
        Some((top, _)) => top,
        None => path,
    }
}

/// Rewrite a workspace path so it starts with its root variable
/// (`src/core/a.cpp` becomes `$_src/core/a.cpp`).
///
/// Paths that already start with a known root variable are returned as-is.
pub fn make_relative_file_path_for_gni(path: &str) -> Result<String> {
    let top = extract_top_level_folder(path);

    if let Some(root) = top.strip_prefix(ROOT_VARIABLE_MARKER) {
        if ROOT_DIRS.contains(&root) {
            return Ok(path.to_string());
        }
    }

    if ROOT_DIRS.contains(&top) {
        Ok(format!("{ROOT_VARIABLE_MARKER}{path}"))
    } else {
        Err(Error::UnsupportedRoot {
            path: path.to_string(),
            root: top.to_string(),
        })
    }
}

/// Apply [`make_relative_file_path_for_gni`] to every path, failing on the first error.
pub fn add_gni_variables_to_workspace_paths<S: AsRef<str>>(paths: &[S]) -> Result<Vec<String>> {
    paths
        .iter()
        .map(|path| make_relative_file_path_for_gni(path.as_ref()))
        .collect()
}

/// The root directory a GN path is relative to (`$_src/a.cpp` -> `src`).
pub fn root_of_gni_path(gni_path: &str) -> Option<&'static str> {
    let root = extract_top_level_folder(gni_path).strip_prefix(ROOT_VARIABLE_MARKER)?;
    ROOT_DIRS.iter().copied().find(|r| *r == root)
}

/// Undo [`make_relative_file_path_for_gni`].
pub fn strip_root_variable(gni_path: &str) -> Option<&str> {
    root_of_gni_path(gni_path)?;
    gni_path.strip_prefix(ROOT_VARIABLE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_relative_file_path_matching_root_dir() {
        let cases = [
            ("src/core/file.cpp", "$_src/core/file.cpp"),
            ("include/core/file.h", "$_include/core/file.h"),
            ("modules/mod/file.cpp", "$_modules/mod/file.cpp"),
        ];
        for (input, expected) in cases {
            assert_eq!(make_relative_file_path_for_gni(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_make_relative_file_path_invalid_input() {
        assert!(make_relative_file_path_for_gni("").is_err());

        let err =
            make_relative_file_path_for_gni("//valid/rule/incorrect/root/dir:file.cpp").unwrap_err();
        assert!(matches!(err, Error::UnsupportedRoot { ref root, .. } if root.is_empty()));

        let err = make_relative_file_path_for_gni("tools/foo.cpp").unwrap_err();
        assert!(matches!(err, Error::UnsupportedRoot { ref root, .. } if root == "tools"));
    }

    #[test]
    fn test_make_relative_file_path_already_rooted() {
        assert_eq!(
            make_relative_file_path_for_gni("$_src/core/file.cpp").unwrap(),
            "$_src/core/file.cpp"
        );
        assert!(make_relative_file_path_for_gni("$_tools/file.cpp").is_err());
    }

    #[test]
    fn test_extract_top_level_folder() {
        assert_eq!(extract_top_level_folder("foo/bar/baz.txt"), "foo");
        assert_eq!(extract_top_level_folder("$_src/bar/baz.txt"), "$_src");
        assert_eq!(extract_top_level_folder("baz.txt"), "baz.txt");
        assert_eq!(extract_top_level_folder("/foo/bar/baz.txt"), "");
    }

    #[test]
    fn test_extract_top_level_folder_no_top_dir() {
        assert_eq!(extract_top_level_folder(""), "");
        assert_eq!(extract_top_level_folder("/"), "");
        assert_eq!(extract_top_level_folder("///"), "");
    }

    #[test]
    fn test_extract_top_level_folder_idempotent_on_rooted_paths() {
        let rooted = make_relative_file_path_for_gni("src/core/a.cpp").unwrap();
        let top = extract_top_level_folder(&rooted);
        assert_eq!(top, "$_src");
        assert_eq!(extract_top_level_folder(top), top);
    }

    #[test]
    fn test_add_gni_variables_to_workspace_paths() {
        let empty: [&str; 0] = [];
        assert!(add_gni_variables_to_workspace_paths(&empty).unwrap().is_empty());

        let paths = add_gni_variables_to_workspace_paths(&[
            "src/include/foo.h",
            "include/foo.h",
            "modules/foo.cpp",
        ])
        .unwrap();
        assert_eq!(
            paths,
            ["$_src/include/foo.h", "$_include/foo.h", "$_modules/foo.cpp"]
        );
    }

    #[test]
    fn test_add_gni_variables_to_workspace_paths_invalid() {
        assert!(add_gni_variables_to_workspace_paths(&["nomatch/include/foo.h"]).is_err());
        assert!(add_gni_variables_to_workspace_paths(&["//src/core:source.cpp"]).is_err());
        assert!(add_gni_variables_to_workspace_paths(&["src/a.cpp", "tools/b.cpp"]).is_err());
    }

    #[test]
    fn test_convert_targets_to_file_paths() {
        let empty: [&str; 0] = [];
        assert!(convert_targets_to_file_paths(&empty).unwrap().is_empty());

        let paths = convert_targets_to_file_paths(&[
            "//src/include:foo.h",
            "//include:foo.h",
            "//modules:foo.cpp",
        ])
        .unwrap();
        assert_eq!(paths, ["src/include/foo.h", "include/foo.h", "modules/foo.cpp"]);
    }

    #[test]
    fn test_convert_targets_to_file_paths_invalid() {
        for labels in [
            vec![""],
            vec!["//src/include:foo.h", ""],
            vec!["", "//src/include:foo.h"],
            vec!["src/include:foo.h"],
            vec!["//src/include/foo.h"],
            vec!["//:foo.h"],
            vec!["//src/include:"],
        ] {
            let err = convert_targets_to_file_paths(&labels).unwrap_err();
            assert!(matches!(err, Error::MalformedLabel { .. }), "{labels:?}");
        }
    }

    #[test]
    fn test_round_trip_through_root_stripping() {
        let labels = ["//src/core:SkAAClip.cpp", "//include/core:SkColor.h"];
        let paths = convert_targets_to_file_paths(&labels).unwrap();
        let gni_paths = add_gni_variables_to_workspace_paths(&paths).unwrap();

        assert_eq!(gni_paths.len(), labels.len());
        let stripped: Vec<_> = gni_paths
            .iter()
            .map(|p| strip_root_variable(p).unwrap())
            .collect();
        assert_eq!(stripped, paths);
    }

    #[test]
    fn test_root_of_gni_path() {
        assert_eq!(root_of_gni_path("$_src/core/a.cpp"), Some("src"));
        assert_eq!(root_of_gni_path("$_modules/a.cpp"), Some("modules"));
        assert_eq!(root_of_gni_path("$_opts/a.cpp"), None);
        assert_eq!(root_of_gni_path("src/a.cpp"), None);
        assert_eq!(strip_root_variable("src/a.cpp"), None);
    }
}
