use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    language::Target,
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Schema files, one unit each
    #[arg(required = true)]
    pub schemas: Vec<PathBuf>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Targets to generate; repeat for several
    #[arg(short, long = "target", value_enum, default_values_t = [Target::TypeScript])]
    pub targets: Vec<Target>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let report = ops::generate(
            &self.schemas,
            &GenerateOptions {
                output_dir: &self.output,
                targets: &self.targets,
                dry_run: self.dry_run,
            },
        );

        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}
