use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Project-local manifest (`xcbundle.toml`) recording where the descriptor
/// and the bundle live, relative to the manifest's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project: PathBuf,
    pub bundle: PathBuf,
    /// `lastKnownFileType` recorded on new file references.
    #[serde(default = "default_file_type")]
    pub file_type: String,
}

impl Config {
    pub const DEFAULT_FILE_TYPE: &'static str = "text";

    pub fn new(project: PathBuf, bundle: PathBuf) -> Self {
        Self {
            project,
            bundle,
            file_type: default_file_type(),
        }
    }
}

fn default_file_type() -> String {
    Config::DEFAULT_FILE_TYPE.to_string()
}
