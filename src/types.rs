use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Identifier width
// ---------------------------------------------------------------------------

/// Length of a full object id in hex characters (SHA-1).
pub const OID_HEX_LEN: usize = 40;

// ---------------------------------------------------------------------------
// ObjectKind
// ---------------------------------------------------------------------------

/// The type of a stored git object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    /// Convert a libgit2 object type to an `ObjectKind`.
    ///
    /// Returns `None` for the pseudo-types (`Any`) that never describe a
    /// stored object.
    pub fn from_git(kind: git2::ObjectType) -> Option<Self> {
        match kind {
            git2::ObjectType::Commit => Some(Self::Commit),
            git2::ObjectType::Tree => Some(Self::Tree),
            git2::ObjectType::Blob => Some(Self::Blob),
            git2::ObjectType::Tag => Some(Self::Tag),
            _ => None,
        }
    }

    /// Canonical name, as printed by `git cat-file --batch`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Emitted
// ---------------------------------------------------------------------------

/// Outcome of a successful [`emit`](crate::emit) call.
///
/// Write failures are not represented here; they come back through the
/// `Err` side of [`Result`](crate::Result) so a fatal error can never be
/// mistaken for a retryable miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    /// The record was written in full.
    Found {
        kind: ObjectKind,
        /// Payload size as reported by the store.
        size: usize,
        /// Total bytes written, header and trailer included.
        written: usize,
    },
    /// The identifier was malformed or absent; nothing was written.
    Unresolved,
}

impl Emitted {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

// ---------------------------------------------------------------------------
// OpenOptions
// ---------------------------------------------------------------------------

/// Options for [`ObjectStore::open`](crate::ObjectStore::open).
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Object directories (`$GIT_DIR/objects`, not `$GIT_DIR`) registered
    /// in order.
    pub alternates: Vec<PathBuf>,
}

impl OpenOptions {
    /// Append an alternate object directory.
    pub fn alternate(mut self, path: impl Into<PathBuf>) -> Self {
        self.alternates.push(path.into());
        self
    }

    /// Append the object directory of the repository at `git_dir`.
    pub fn repository(mut self, git_dir: impl Into<PathBuf>) -> Self {
        self.alternates.push(git_dir.into().join("objects"));
        self
    }
}

// ---------------------------------------------------------------------------
// BatchStats
// ---------------------------------------------------------------------------

/// Counters reported by [`batch::run`](crate::batch::run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub found: usize,
    pub missing: usize,
}

impl BatchStats {
    pub fn total(&self) -> usize {
        self.found + self.missing
    }
}
