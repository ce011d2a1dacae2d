use clap::Args;
use eyre::Result;

use super::GlobalArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Fail on template placeholders without a fragment
    #[arg(long)]
    pub strict: bool,
}

impl CheckCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let mikro_toml = global.open();

        let report = ops::check(mikro_toml.manifest(), &global.config, self.strict)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
