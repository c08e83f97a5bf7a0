//! `git cat-file --batch` style records.
//!
//! A hit is written as three segments:
//!
//! ```text
//! <hex-oid> <type> <size>\n<payload>\n
//! ```
//!
//! A malformed or absent id writes nothing at all, so the caller can retry
//! with a different representation.

use std::os::fd::AsFd;

use crate::error::Result;
use crate::oid;
use crate::store::{ObjectStore, RetrievedObject};
use crate::types::Emitted;
use crate::writev::{write_all_vectored, VectoredOutput};

const TRAILER: &[u8] = b"\n";

/// Write the record for `oid_hex` to `fd`.
///
/// Returns `Ok(true)` once the whole record is written and `Ok(false)` if
/// the id is malformed, unknown or unreadable (nothing written). Write
/// failures are returned as [`Error::Io`](crate::Error::Io), never as `false`.
///
/// The descriptor may be blocking or non-blocking; it is never closed.
pub fn cat_oid(store: &ObjectStore, fd: impl AsFd, oid_hex: impl AsRef<[u8]>) -> Result<bool> {
    Ok(emit(store, fd, oid_hex)?.is_found())
}

/// Like [`cat_oid`], reporting what was written.
pub fn emit(store: &ObjectStore, fd: impl AsFd, oid_hex: impl AsRef<[u8]>) -> Result<Emitted> {
    let mut out = fd.as_fd();
    emit_to(store, &mut out, oid_hex.as_ref())
}

/// Like [`emit`], writing through any [`VectoredOutput`].
pub fn emit_to<W>(store: &ObjectStore, out: &mut W, oid_hex: &[u8]) -> Result<Emitted>
where
    W: VectoredOutput + ?Sized,
{
    let Some(oid) = oid::parse(oid_hex) else {
        log::trace!("unresolvable id {:?}", String::from_utf8_lossy(oid_hex));
        return Ok(Emitted::Unresolved);
    };
    let Some(object) = store.lookup(oid) else {
        return Ok(Emitted::Unresolved);
    };
    write_record(out, &object)
    // object drops here, on success and failure alike
}

fn header(object: &RetrievedObject<'_>) -> Vec<u8> {
    format!("{} {} {}\n", object.id(), object.kind(), object.size()).into_bytes()
}

fn write_record<W>(out: &mut W, object: &RetrievedObject<'_>) -> Result<Emitted>
where
    W: VectoredOutput + ?Sized,
{
    let hdr = header(object);
    let written = write_all_vectored(out, &[hdr.as_slice(), object.data(), TRAILER]).map_err(|e| {
        log::warn!("writing {} failed: {}", object.id(), e);
        e
    })?;
    Ok(Emitted::Found {
        kind: object.kind(),
        size: object.size(),
        written,
    })
}
