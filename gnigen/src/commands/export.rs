use clap::Args;
use eyre::Result;

use super::{ProjectArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the generated files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportCommand {
    pub fn run(&self) -> Result<()> {
        let toml = self.project.open();
        let workspace_dir = toml.workspace_dir().unwrap_or_exit();
        let query = self.project.query(&toml, workspace_dir.clone());

        let report = ops::export(
            toml.manifest(),
            query.as_ref(),
            ops::export::ExportOptions {
                workspace_dir: &workspace_dir,
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit();

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
