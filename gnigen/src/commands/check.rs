use clap::Args;
use eyre::Result;

use super::{ProjectArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl CheckCommand {
    /// Run the check command, exiting with status 1 when anything is stale
    pub fn run(&self) -> Result<()> {
        let toml = self.project.open();
        let workspace_dir = toml.workspace_dir().unwrap_or_exit();
        let query = self.project.query(&toml, workspace_dir.clone());

        let report = ops::check(toml.manifest(), toml.path(), query.as_ref(), &workspace_dir)
            .unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        if !report.is_current() {
            std::process::exit(1);
        }
        Ok(())
    }
}
