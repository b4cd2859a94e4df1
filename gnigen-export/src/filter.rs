//! Consistency checks on resolved source lists.

use std::{collections::HashMap, path::Path};

/// Public headers that were removed but are still listed by some rules.
pub const DEPRECATED_FILES: &[&str] = &[
    "include/core/SkDrawLooper.h",
    "include/effects/SkBlurDrawLooper.h",
    "include/effects/SkLayerDrawLooper.h",
];

/// Whether `path` names a C/C++ header (`.h` or `.hpp`, any case).
pub fn is_header_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("h") || ext.eq_ignore_ascii_case("hpp"))
}

/// Whether every path is a header. True for an empty list.
pub fn file_list_contains_only_cpp_header_files<S: AsRef<str>>(paths: &[S]) -> bool {
    paths.iter().all(|path| is_header_file(path.as_ref()))
}

/// Whether `path` is one of [`DEPRECATED_FILES`].
pub fn is_source_file_deprecated(path: &str) -> bool {
    DEPRECATED_FILES.contains(&path)
}

/// Drop deprecated files, keeping the order of everything else.
pub fn filter_deprecated_files<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    paths
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|path| !is_source_file_deprecated(path))
        .map(str::to_string)
        .collect()
}

/// First path that occurs again later in the list, compared case-insensitively.
///
/// The path is returned as it was first spelled.
pub fn find_duplicate<S: AsRef<str>>(paths: &[S]) -> Option<&str> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(paths.len());
    for path in paths.iter().map(AsRef::<str>::as_ref) {
        if let Some(first) = seen.get(&path.to_lowercase()) {
            return Some(*first);
        }
        seen.insert(path.to_lowercase(), path);
    }
    None
}
