use thiserror::Error;

/// All errors that can occur in shelfscope-core.
///
/// Data-shape looseness in the season document is not an error: hydration
/// defaults missing or mistyped fields instead of failing. These variants
/// cover the real I/O boundaries only.
#[derive(Debug, Error)]
pub enum ShelfscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ShelfscopeError>;
