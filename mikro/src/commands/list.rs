use clap::Args;
use eyre::Result;

use super::GlobalArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {}

impl ListCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let mikro_toml = global.open();

        let report = ops::list(mikro_toml.manifest(), &global.root(&mikro_toml))?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
