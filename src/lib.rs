//! Stream git objects by id over a raw file descriptor.
//!
//! `catoid` wraps a libgit2 object database and writes objects in the same
//! format as `git cat-file --batch`:
//!
//! ```text
//! <hex-oid> <type> <size>\n<payload>\n
//! ```
//!
//! Output goes through `writev(2)` and survives short writes, `EAGAIN` (by
//! polling for writability) and `EINTR`, so the descriptor may be a
//! non-blocking pipe or socket owned by the host.
//!
//! # Key types
//!
//! - [`ObjectStore`] — owns the object database and its alternates.
//! - [`cat_oid`] / [`emit`] — look up one id and write its record.
//! - [`write_all_vectored`] — the partial-write-safe writer underneath.
//! - [`batch::run`] — a `cat-file --batch` style request loop.
//!
//! # Quick example
//!
//! ```rust,no_run
//! use catoid::{cat_oid, ObjectStore};
//!
//! let mut store = ObjectStore::new().unwrap();
//! store.add_alternate("/srv/git/project.git/objects").unwrap();
//!
//! let stdout = std::io::stdout();
//! let found = cat_oid(&store, &stdout, "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391").unwrap();
//! if !found {
//!     // unresolved: nothing was written, retry elsewhere
//! }
//! ```

pub mod batch;
pub mod emit;
pub mod error;
pub mod oid;
pub mod store;
pub mod types;
pub mod writev;

// Re-export primary public types at crate root.
pub use error::{Error, Result};
pub use store::{ObjectStore, RetrievedObject};
pub use emit::{cat_oid, emit, emit_to};
pub use writev::{write_all_vectored, VectoredOutput};
pub use types::*;
