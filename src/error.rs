use thiserror::Error;

/// Failures that can occur while loading a navigation tree or engine
/// configuration. Runtime transitions never produce these.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid navigation tree JSON: {0}")]
    TreeParse(#[source] serde_json::Error),

    #[error("invalid engine configuration JSON: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate navigation root id '{0}'")]
    DuplicateRoot(String),

    #[error("legacy route '{from}' maps to '{to}', which is itself a legacy route")]
    LegacyChain { from: String, to: String },

    #[error("invalid selection snapshot: {0}")]
    Snapshot(String),
}

pub type NavResult<T> = Result<T, NavError>;
