use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{ObjectKind, OpenOptions};

/// A read-only git object database assembled from on-disk object
/// directories.
///
/// The store starts empty and is extended with
/// [`add_alternate`](ObjectStore::add_alternate). The native handle is freed
/// exactly once when the store is dropped; every [`RetrievedObject`] borrows
/// the store, so none can outlive it.
///
/// Not `Sync`: serialise lookups across threads externally.
pub struct ObjectStore {
    odb: git2::Odb<'static>,
    alternates: Vec<PathBuf>,
}

/// An object read from an [`ObjectStore`].
///
/// Freed when dropped, on every exit path of the call that produced it.
pub struct RetrievedObject<'s> {
    obj: git2::OdbObject<'s>,
    kind: ObjectKind,
}

impl ObjectStore {
    /// Create an empty object database.
    ///
    /// # Errors
    /// Returns [`Error::Init`] if libgit2 cannot allocate the database.
    pub fn new() -> Result<Self> {
        let odb = git2::Odb::new().map_err(Error::Init)?;
        Ok(ObjectStore {
            odb,
            alternates: Vec::new(),
        })
    }

    /// Create a store and register every alternate in `options`, in order.
    pub fn open(options: &OpenOptions) -> Result<Self> {
        let mut store = Self::new()?;
        for path in &options.alternates {
            store.add_alternate(path)?;
        }
        Ok(store)
    }

    /// Register an on-disk object directory.
    ///
    /// `objects_path` must be `$GIT_DIR/objects`, not `$GIT_DIR`. Paths are
    /// canonicalized, so registering the same directory twice under any
    /// spelling is a no-op.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the path is missing, not a directory, not
    /// UTF-8, looks like a repository root, or is rejected by libgit2.
    /// Previously registered sources stay usable.
    pub fn add_alternate(&mut self, objects_path: impl AsRef<Path>) -> Result<()> {
        let given = objects_path.as_ref();
        let path = std::fs::canonicalize(given).map_err(|e| Error::config(given, e.to_string()))?;

        if self.alternates.contains(&path) {
            log::debug!("alternate already registered: {}", path.display());
            return Ok(());
        }

        if !path.is_dir() {
            return Err(Error::config(path, "not a directory"));
        }
        if path.join("HEAD").is_file() && path.join("objects").is_dir() {
            return Err(Error::config(
                path,
                "looks like a repository; pass its objects directory",
            ));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::config(&path, "path is not valid UTF-8"))?;

        self.odb
            .add_disk_alternate(path_str)
            .map_err(|e| Error::config(&path, e.message()))?;

        log::debug!("registered alternate {}", path.display());
        self.alternates.push(path);
        Ok(())
    }

    /// Register the object directory of the repository at `git_dir`.
    pub fn add_repository(&mut self, git_dir: impl AsRef<Path>) -> Result<()> {
        self.add_alternate(git_dir.as_ref().join("objects"))
    }

    /// Registered object directories, canonicalized, in registration order.
    pub fn alternates(&self) -> &[PathBuf] {
        &self.alternates
    }

    /// Whether `objects_path` names an already registered directory.
    pub fn has_alternate(&self, objects_path: impl AsRef<Path>) -> bool {
        std::fs::canonicalize(objects_path)
            .map(|p| self.alternates.contains(&p))
            .unwrap_or(false)
    }

    /// Whether an object exists, without reading it.
    pub fn contains(&self, oid: git2::Oid) -> bool {
        self.odb.exists(oid)
    }

    /// Read the object with the given id.
    ///
    /// Returns `None` when no registered source can produce it. Read failures
    /// other than not-found (a corrupt loose object, an unreadable pack) are
    /// logged and also answered with `None`, leaving the caller free to retry
    /// elsewhere. Precedence among alternates is libgit2's own resolution
    /// order.
    pub fn lookup(&self, oid: git2::Oid) -> Option<RetrievedObject<'_>> {
        let obj = match self.odb.read(oid) {
            Ok(obj) => obj,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                log::trace!("{} not found", oid);
                return None;
            }
            Err(e) => {
                log::warn!("reading {} failed: {}", oid, e.message());
                return None;
            }
        };
        match ObjectKind::from_git(obj.kind()) {
            Some(kind) => Some(RetrievedObject { obj, kind }),
            None => {
                log::warn!("{} has no concrete object type", oid);
                None
            }
        }
    }

    /// Release the store. Equivalent to dropping it.
    pub fn destroy(self) {
        drop(self);
    }
}

impl Drop for ObjectStore {
    fn drop(&mut self) {
        log::debug!(
            "releasing object store with {} alternate(s)",
            self.alternates.len()
        );
    }
}

impl RetrievedObject<'_> {
    /// Object id as stored.
    pub fn id(&self) -> git2::Oid {
        self.obj.id()
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.obj.len()
    }

    /// Raw (decompressed) payload.
    pub fn data(&self) -> &[u8] {
        self.obj.data()
    }
}

impl std::fmt::Debug for RetrievedObject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievedObject")
            .field("id", &self.id())
            .field("kind", &self.kind)
            .field("size", &self.size())
            .finish()
    }
}
