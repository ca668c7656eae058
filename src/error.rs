use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XcbundleError {
    #[error("failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project descriptor not found: {0}")]
    DescriptorNotFound(PathBuf),

    #[error("bundle file not found: {0}")]
    BundleNotFound(PathBuf),

    #[error("failed to parse {path} at line {line}, column {column}: {message}")]
    DescriptorParse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("descriptor has no object table; not a project descriptor?")]
    NoObjectTable,

    #[error("descriptor has no root project object")]
    NoRootObject,

    #[error("could not find the main group in the project descriptor")]
    MainGroupNotFound,

    #[error("no resources build phase found; add the bundle to Copy Bundle Resources manually")]
    ResourcesPhaseNotFound,

    #[error("object {id} referenced but not present in the object table")]
    DanglingReference { id: String },

    #[error("manifest not found; pass --project/--bundle or run `xcbundle init`")]
    ManifestNotFound,

    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("manifest already exists at {0}")]
    ManifestExists(PathBuf),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("no .xcodeproj found under {0}")]
    NoProjectFound(PathBuf),

    #[error("multiple .xcodeproj directories found under {root}; pass --project to disambiguate")]
    AmbiguousProject { root: PathBuf },

    #[error("could not generate a unique identifier")]
    IdentExhausted,
}
