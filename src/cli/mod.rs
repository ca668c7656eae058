pub mod check;
pub mod init;
pub mod register;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "xcbundle",
    about = "Registers prebuilt JS bundles in Xcode project descriptors",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ensure the bundle is copied by the project's resources build phase
    Register {
        /// Path to the project.pbxproj (default: from xcbundle.toml, or auto-detected)
        #[arg(short, long, env = "XCBUNDLE_PROJECT")]
        project: Option<PathBuf>,

        /// Path to the bundle file (default: from xcbundle.toml)
        #[arg(short, long, env = "XCBUNDLE_BUNDLE")]
        bundle: Option<PathBuf>,

        /// Report what would change without writing the descriptor
        #[arg(long)]
        dry_run: bool,
    },

    /// Report whether the bundle is wired into the resources build phase
    Check {
        /// Path to the project.pbxproj (default: from xcbundle.toml, or auto-detected)
        #[arg(short, long, env = "XCBUNDLE_PROJECT")]
        project: Option<PathBuf>,

        /// Path to the bundle file (default: from xcbundle.toml)
        #[arg(short, long, env = "XCBUNDLE_BUNDLE")]
        bundle: Option<PathBuf>,
    },

    /// Write an xcbundle.toml manifest for this project
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Descriptor path to record (default: auto-detected)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Bundle path to record (default: derived from the project name)
        #[arg(short, long)]
        bundle: Option<PathBuf>,
    },
}
