use clap::Args;
use eyre::{Result, bail};

use super::GlobalArgs;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct DatabaseCommand {
    /// Database connections to generate modules for
    pub names: Vec<String>,

    /// Generate every connection in mikro.toml
    #[arg(long, conflicts_with = "names")]
    pub all: bool,

    /// Preview generated modules without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl DatabaseCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let mikro_toml = global.open();
        let manifest = mikro_toml.manifest();

        let names: Vec<String> = if self.all {
            manifest.database_names().map(str::to_string).collect()
        } else {
            self.names.clone()
        };
        if names.is_empty() {
            bail!("no database connections given, pass their names or --all");
        }

        let report = ops::database(
            manifest,
            &names,
            GenerateOptions {
                root: &global.root(&mikro_toml),
                dry_run: self.dry_run,
                strict: None,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}
