use std::path::PathBuf;

/// All errors produced by catoid.
///
/// A missing or malformed identifier is not an error: it is reported as an
/// unresolved outcome by [`cat_oid`](crate::cat_oid) and
/// [`emit`](crate::emit).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("git_odb_new: {0}")]
    Init(#[source] git2::Error),

    #[error("alternate rejected: {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl Error {
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error was raised while registering an alternate.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Whether this error came from writing to the output descriptor.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
