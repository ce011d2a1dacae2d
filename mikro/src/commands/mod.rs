mod check;
mod completions;
mod crud;
mod database;
mod index;
mod list;
mod schema;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use crud::CrudCommand;
use database::DatabaseCommand;
use eyre::Result;
use index::IndexCommand;
use list::ListCommand;
use mikrogen_manifest::MikroToml;
use schema::SchemaCommand;

use crate::logging;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mikrogen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "mikro")]
#[command(version)]
#[command(about = "Generate CRUD models for mikro modules from mikro.toml")]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        logging::init(self.global.verbose)?;

        match &self.command {
            Commands::Crud(cmd) => cmd.run(&self.global),
            Commands::Schema(cmd) => cmd.run(&self.global),
            Commands::Database(cmd) => cmd.run(&self.global),
            Commands::Check(cmd) => cmd.run(&self.global),
            Commands::List(cmd) => cmd.run(&self.global),
            Commands::Index(cmd) => cmd.run(&self.global),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to mikro.toml (defaults to ./mikro.toml)
    #[arg(short, long, global = true, default_value = "mikro.toml")]
    pub config: PathBuf,

    /// Module root (defaults to the directory of mikro.toml)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Load the manifest, exiting with a rendered diagnostic on failure.
    pub fn open(&self) -> MikroToml {
        MikroToml::open(&self.config).unwrap_or_exit()
    }

    /// The module root generated files are written under.
    pub fn root(&self, file: &MikroToml) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| file.root().to_path_buf())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model modules from crud policies
    Crud(CrudCommand),

    /// Generate schema structure modules
    Schema(SchemaCommand),

    /// Generate database connection modules
    Database(DatabaseCommand),

    /// Validate mikro.toml and synthesize every policy without writing
    Check(CheckCommand),

    /// List connections, schemas, crud policies and registered modules
    List(ListCommand),

    /// Rewrite the index files from the modules on disk
    Index(IndexCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
