//! Export command report data structures.

use super::output::{Output, Report};

/// Report data from exporting (or previewing) generated files.
#[derive(Debug)]
pub struct ExportReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Generated files, in manifest order.
    pub files: Vec<FileSummary>,
}

/// One generated file.
#[derive(Debug)]
pub struct FileSummary {
    /// Workspace-relative destination.
    pub gni: String,
    pub variables: Vec<VariableSummary>,
    /// Full rendered text, shown in dry runs.
    pub content: String,
}

#[derive(Debug)]
pub struct VariableSummary {
    pub name: String,
    pub file_count: usize,
    /// Every listed file is a C/C++ header.
    pub headers_only: bool,
}

impl VariableSummary {
    fn describe(&self) -> String {
        let noun = if self.file_count == 1 { "file" } else { "files" };
        let marker = if self.headers_only { " [headers only]" } else { "" };
        format!("{} ({} {}){}", self.name, self.file_count, noun, marker)
    }
}

impl Report for ExportReport {
    fn render(&self, out: &mut dyn Output) {
        if self.dry_run {
            for file in &self.files {
                out.divider(&file.gni);
                out.preformatted(&file.content);
            }
            out.divider("Summary");
            let count = self.files.len();
            out.preformatted(&format!(
                "{} file{} would be generated",
                count,
                if count == 1 { "" } else { "s" }
            ));
            return;
        }

        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(&format!("Wrote {}", file.gni));
            for var in &file.variables {
                out.list_item(&var.describe());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report(dry_run: bool) -> ExportReport {
        ExportReport {
            dry_run,
            files: vec![FileSummary {
                gni: "gn/core.gni".to_string(),
                variables: vec![
                    VariableSummary {
                        name: "skia_core_public".to_string(),
                        file_count: 1,
                        headers_only: true,
                    },
                    VariableSummary {
                        name: "skia_core_sources".to_string(),
                        file_count: 6,
                        headers_only: false,
                    },
                ],
                content: "skia_core_sources = []\n".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_written() {
        let mut out = RecordingOutput::default();
        report(false).render(&mut out);

        assert_eq!(
            out.stdout,
            [
                "Wrote gn/core.gni:",
                "  - skia_core_public (1 file) [headers only]",
                "  - skia_core_sources (6 files)",
            ]
        );
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_render_dry_run_pluralizes() {
        let mut report = report(true);
        report.files.push(FileSummary {
            gni: "gn/effects.gni".to_string(),
            variables: Vec::new(),
            content: String::new(),
        });
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.stdout.last().unwrap(), "2 files would be generated");
    }

    #[test]
    fn test_render_dry_run() {
        let mut out = RecordingOutput::default();
        report(true).render(&mut out);

        assert_eq!(out.stdout[0], "── gn/core.gni ──");
        assert_eq!(out.stdout.last().unwrap(), "1 file would be generated");
    }
}
