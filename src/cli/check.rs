use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::registrar;
use crate::store::{Descriptor, locate};

pub fn run(project: Option<PathBuf>, bundle: Option<PathBuf>) -> Result<()> {
    let inputs = locate::resolve(project, bundle).context("failed to resolve project paths")?;
    let bundle_name = inputs
        .bundle
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("bundle path has no file name: {}", inputs.bundle.display()))?;

    let descriptor = Descriptor::open(&inputs.project)?;
    let wiring = registrar::inspect(&descriptor, &bundle_name)?;

    println!("Project: {}", descriptor.path().display());
    println!("Bundle: {bundle_name}");
    match &wiring.file_ref {
        Some(id) => println!("  file reference: {id}"),
        None => println!("  file reference: missing"),
    }
    println!(
        "  in main group: {}",
        if wiring.in_main_group { "yes" } else { "no" }
    );
    if wiring.phases.is_empty() {
        println!("  resources phases: none");
    }
    for (phase, wired) in &wiring.phases {
        println!(
            "  resources phase {phase}: {}",
            if *wired { "copies bundle" } else { "missing bundle" }
        );
    }

    if wiring.fully_wired() {
        println!("'{bundle_name}' is fully registered.");
        Ok(())
    } else {
        anyhow::bail!("'{bundle_name}' is not registered; run `xcbundle register`")
    }
}
