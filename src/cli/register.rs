use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::XcbundleError;
use crate::registrar::{self, RegisterOutcome};
use crate::store::{Descriptor, locate};

pub fn run(project: Option<PathBuf>, bundle: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let inputs = locate::resolve(project, bundle).context("failed to resolve project paths")?;

    if !inputs.project.exists() {
        anyhow::bail!(XcbundleError::DescriptorNotFound(inputs.project));
    }
    if !inputs.bundle.exists() {
        eprintln!("bundle not found: {}", inputs.bundle.display());
        eprintln!("  run your JS bundler first (e.g. `npm run bundle`)");
        anyhow::bail!(XcbundleError::BundleNotFound(inputs.bundle));
    }

    let bundle_name = file_name(&inputs.bundle)?;
    println!("Registering {bundle_name} in {}", inputs.project.display());

    let mut descriptor = Descriptor::open(&inputs.project)?;
    let outcome = match registrar::register(&mut descriptor, &bundle_name, &inputs.file_type) {
        Ok(outcome) => outcome,
        Err(err @ XcbundleError::ResourcesPhaseNotFound) => {
            eprintln!("warning: this project has no Copy Bundle Resources phase");
            eprintln!("  add '{bundle_name}' to the target's Copy Bundle Resources manually in Xcode");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    match outcome {
        RegisterOutcome::AlreadyRegistered { file_ref } => {
            println!("'{bundle_name}' is already in Copy Bundle Resources ({file_ref}).");
        }
        RegisterOutcome::Registered {
            file_ref,
            reused_file_ref,
            build_files,
        } => {
            if reused_file_ref {
                println!("  reusing existing file reference {file_ref}");
            } else {
                println!("  added file reference {file_ref}");
            }
            for build_file in &build_files {
                println!("  added to Copy Bundle Resources ({build_file})");
            }
            if dry_run {
                println!("Dry run: {} left untouched.", descriptor.path().display());
            } else {
                descriptor.save().context("failed to write descriptor")?;
                println!(
                    "Registered '{bundle_name}' in {}.",
                    descriptor.path().display()
                );
            }
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("bundle path has no file name: {}", path.display()))
}
