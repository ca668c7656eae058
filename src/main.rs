use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod model;
mod plist;
mod registrar;
mod store;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if cli.verbose {
                    "xcbundle=debug"
                } else {
                    "xcbundle=info"
                }
                .parse()
                .unwrap()
            }),
        )
        .init();

    match cli.command {
        cli::Command::Register {
            project,
            bundle,
            dry_run,
        } => cli::register::run(project, bundle, dry_run),
        cli::Command::Check { project, bundle } => cli::check::run(project, bundle),
        cli::Command::Init {
            path,
            project,
            bundle,
        } => cli::init::run(path, project, bundle),
    }
}
