use clap::Args;
use eyre::{Result, bail};

use super::GlobalArgs;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CrudCommand {
    /// Crud policies to generate models for
    pub names: Vec<String>,

    /// Generate every crud policy in mikro.toml
    #[arg(long, conflicts_with = "names")]
    pub all: bool,

    /// Preview generated models without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Fail on template placeholders without a fragment
    #[arg(long)]
    pub strict: bool,
}

impl CrudCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let mikro_toml = global.open();
        let manifest = mikro_toml.manifest();

        let names: Vec<String> = if self.all {
            manifest.policy_names().map(str::to_string).collect()
        } else {
            self.names.clone()
        };
        if names.is_empty() {
            bail!("no crud policies given, pass their names or --all");
        }

        let report = ops::crud(
            manifest,
            &names,
            GenerateOptions {
                root: &global.root(&mikro_toml),
                dry_run: self.dry_run,
                strict: self.strict.then_some(true),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}
