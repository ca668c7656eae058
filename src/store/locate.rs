use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::XcbundleError;
use crate::model::Config;

pub const MANIFEST_FILE: &str = "xcbundle.toml";

/// Fully resolved invocation inputs.
pub struct Inputs {
    pub project: PathBuf,
    pub bundle: PathBuf,
    pub file_type: String,
}

/// Resolves the descriptor and bundle paths from explicit arguments, the
/// nearest manifest, or a tree scan for a single `.xcodeproj`, in that
/// order of preference.
pub fn resolve(project: Option<PathBuf>, bundle: Option<PathBuf>) -> Result<Inputs, XcbundleError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&cwd, project, bundle)
}

pub fn resolve_from(
    start: &Path,
    project: Option<PathBuf>,
    bundle: Option<PathBuf>,
) -> Result<Inputs, XcbundleError> {
    if let (Some(project), Some(bundle)) = (&project, &bundle) {
        return Ok(Inputs {
            project: project.clone(),
            bundle: bundle.clone(),
            file_type: Config::DEFAULT_FILE_TYPE.to_string(),
        });
    }

    match find_manifest(start)? {
        Some((root, config)) => {
            let inputs = Inputs {
                project: project.unwrap_or_else(|| root.join(&config.project)),
                bundle: bundle.unwrap_or_else(|| root.join(&config.bundle)),
                file_type: config.file_type,
            };
            debug!(
                project = %inputs.project.display(),
                bundle = %inputs.bundle.display(),
                "resolved inputs from manifest"
            );
            Ok(inputs)
        }
        None => {
            // Without a manifest the bundle path cannot be inferred.
            let bundle = bundle.ok_or(XcbundleError::ManifestNotFound)?;
            let project = match project {
                Some(p) => p,
                None => find_descriptor(start)?,
            };
            Ok(Inputs {
                project,
                bundle,
                file_type: Config::DEFAULT_FILE_TYPE.to_string(),
            })
        }
    }
}

/// Walks parent directories looking for `xcbundle.toml`.
pub fn find_manifest(start: &Path) -> Result<Option<(PathBuf, Config)>, XcbundleError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_FILE);
        if candidate.exists() {
            let content =
                fs::read_to_string(&candidate).map_err(|source| XcbundleError::FileRead {
                    path: candidate.clone(),
                    source,
                })?;
            let config: Config = toml::from_str(&content)?;
            return Ok(Some((current, config)));
        }
        if !current.pop() {
            return Ok(None);
        }
    }
}

/// Scans for `*.xcodeproj/project.pbxproj` under `root`, skipping
/// dependency and VCS trees. Exactly one match is required.
pub fn find_descriptor(root: &Path) -> Result<PathBuf, XcbundleError> {
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        let name = e.file_name().to_string_lossy();
        name != "node_modules" && name != ".git" && name != "Pods"
    });

    let mut found = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        if entry.file_type().is_dir()
            && entry.path().extension().is_some_and(|ext| ext == "xcodeproj")
        {
            let descriptor = entry.path().join("project.pbxproj");
            if descriptor.exists() {
                found.push(descriptor);
            }
        }
    }

    match found.len() {
        0 => Err(XcbundleError::NoProjectFound(root.to_path_buf())),
        1 => Ok(found.remove(0)),
        _ => Err(XcbundleError::AmbiguousProject {
            root: root.to_path_buf(),
        }),
    }
}
