//! Request loop in the style of `git cat-file --batch`.
//!
//! Each input line is `<oid>` or `<oid> <git-dir>`. Found objects are
//! written as records (see [`cat_oid`]); anything else produces
//! `<oid> missing\n`. When a line names a `<git-dir>` that is not registered
//! yet, a miss registers `<git-dir>/objects` and retries once, so a host can
//! feed requests for many repositories through one process.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::BufRead;
use std::os::fd::AsFd;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::emit::cat_oid;
use crate::error::{Error, Result};
use crate::store::ObjectStore;
use crate::types::BatchStats;
use crate::writev::write_all_vectored;

/// One parsed request line.
#[derive(Debug, PartialEq, Eq)]
pub struct Request<'a> {
    pub oid: &'a [u8],
    pub git_dir: Option<&'a Path>,
}

impl<'a> Request<'a> {
    /// Parse a request line, without its trailing newline.
    ///
    /// Returns `None` for blank lines.
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            return None;
        }
        let (oid, git_dir) = match line.iter().position(|&b| b == b' ') {
            Some(i) => {
                let dir = &line[i + 1..];
                let dir = (!dir.is_empty()).then(|| Path::new(OsStr::from_bytes(dir)));
                (&line[..i], dir)
            }
            None => (line, None),
        };
        Some(Request { oid, git_dir })
    }
}

/// Serve requests from `input` until EOF, writing to `out`.
///
/// # Errors
/// Stops at the first read or write error. A `<git-dir>` that cannot be
/// registered is logged and its requests are answered as missing.
pub fn run(store: &mut ObjectStore, input: impl BufRead, out: impl AsFd) -> Result<BatchStats> {
    let mut input = input;
    let mut fd = out.as_fd();
    let mut stats = BatchStats::default();
    let mut rejected: HashSet<PathBuf> = HashSet::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let raw = line.strip_suffix(b"\n").unwrap_or(&line);
        let Some(req) = Request::parse(raw) else {
            continue;
        };

        if cat_oid(store, fd, req.oid)? || retry_with_repository(store, fd, &req, &mut rejected)? {
            stats.found += 1;
            continue;
        }

        write_all_vectored(&mut fd, &[req.oid, b" missing\n".as_slice()])?;
        stats.missing += 1;
    }

    log::debug!("batch done: {} found, {} missing", stats.found, stats.missing);
    Ok(stats)
}

fn retry_with_repository(
    store: &mut ObjectStore,
    fd: impl AsFd,
    req: &Request<'_>,
    rejected: &mut HashSet<PathBuf>,
) -> Result<bool> {
    let Some(git_dir) = req.git_dir else {
        return Ok(false);
    };
    if store.has_alternate(git_dir.join("objects")) || rejected.contains(git_dir) {
        return Ok(false);
    }
    match store.add_repository(git_dir) {
        Ok(()) => cat_oid(store, fd, req.oid),
        Err(e @ Error::Config { .. }) => {
            log::warn!("{}", e);
            rejected.insert(git_dir.to_path_buf());
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_oid_only() {
        let req = Request::parse(b"e69de29bb2d1d6434b8b29ae775ad8c2e48c5391").unwrap();
        assert_eq!(req.oid, b"e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
        assert!(req.git_dir.is_none());
    }

    #[test]
    fn parse_with_git_dir() {
        let req = Request::parse(b"abc /srv/git/a.git").unwrap();
        assert_eq!(req.oid, b"abc");
        assert_eq!(req.git_dir, Some(Path::new("/srv/git/a.git")));
    }

    #[test]
    fn parse_git_dir_with_space() {
        let req = Request::parse(b"abc /srv/my repo.git").unwrap();
        assert_eq!(req.git_dir, Some(Path::new("/srv/my repo.git")));
    }

    #[test]
    fn parse_trailing_space_has_no_git_dir() {
        let req = Request::parse(b"abc ").unwrap();
        assert_eq!(req.oid, b"abc");
        assert!(req.git_dir.is_none());
    }

    #[test]
    fn parse_strips_cr() {
        let req = Request::parse(b"abc\r").unwrap();
        assert_eq!(req.oid, b"abc");
    }

    #[test]
    fn parse_blank() {
        assert!(Request::parse(b"").is_none());
        assert!(Request::parse(b"\r").is_none());
    }
}
