//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from comparing generated files with a fresh render.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of generated files compared.
    pub files_checked: usize,
    /// Number of out-of-date variables.
    pub out_of_date: usize,
    /// Description lines for each out-of-date variable.
    pub details: Vec<String>,
}

impl CheckReport {
    pub fn is_current(&self) -> bool {
        self.out_of_date == 0
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for line in &self.details {
            out.diagnostic(line);
        }

        if self.is_current() {
            out.preformatted(&format!(
                "✓ {} file{} up to date",
                self.files_checked,
                if self.files_checked == 1 { " is" } else { "s are" }
            ));
            return;
        }

        out.diagnostic("");
        out.key_value("Out of date", &self.out_of_date.to_string());
        out.preformatted(&format!(
            "Run `gnigen export -c {}` to regenerate.",
            self.config_path.display()
        ));
    }
}
