use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::XcbundleError;
use crate::model::Config;
use crate::store::locate;

pub fn run(path: Option<PathBuf>, project: Option<PathBuf>, bundle: Option<PathBuf>) -> Result<()> {
    let root = match path {
        Some(path) => path,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };

    let manifest_path = root.join(locate::MANIFEST_FILE);
    if manifest_path.exists() {
        anyhow::bail!(XcbundleError::ManifestExists(manifest_path));
    }

    let project = match project {
        Some(project) => project,
        None => {
            let found = locate::find_descriptor(&root)?;
            found.strip_prefix(&root).unwrap_or(&found).to_path_buf()
        }
    };
    let bundle = bundle.unwrap_or_else(|| default_bundle_path(&project));

    let config = Config::new(project, bundle);
    let content = toml::to_string_pretty(&config).map_err(XcbundleError::TomlSerialize)?;
    fs::write(&manifest_path, content).map_err(|source| XcbundleError::FileWrite {
        path: manifest_path.clone(),
        source,
    })?;

    println!("Initialized {}", manifest_path.display());
    println!("  project = {}", config.project.display());
    println!("  bundle = {}", config.bundle.display());
    Ok(())
}

/// Conventional bundle location: next to the app sources, named after the
/// bundler's default output. `App.xcodeproj/project.pbxproj` becomes
/// `App/main.jsbundle`.
fn default_bundle_path(project: &Path) -> PathBuf {
    let app_dir = project
        .parent()
        .and_then(|p| p.file_stem())
        .map(PathBuf::from)
        .unwrap_or_default();
    let base = project
        .parent()
        .and_then(|p| p.parent())
        .unwrap_or_else(|| Path::new(""));
    base.join(app_dir).join("main.jsbundle")
}
