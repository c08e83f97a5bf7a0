use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use catoid::*;

#[allow(dead_code)]
pub const EMPTY_BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

/// Create a bare repository named `name` under `dir`.
pub fn create_repo(dir: &Path, name: &str) -> git2::Repository {
    git2::Repository::init_bare(dir.join(name)).unwrap()
}

/// The canonical `objects/` directory of a repository.
pub fn objects_dir(repo: &git2::Repository) -> PathBuf {
    std::fs::canonicalize(repo.path().join("objects")).unwrap()
}

#[allow(dead_code)]
pub const CORRUPT_OID: &str = "0123456789abcdef0123456789abcdef01234567";

/// Plant a loose object file for [`CORRUPT_OID`] that is not zlib data.
#[allow(dead_code)]
pub fn write_corrupt_object(repo: &git2::Repository) {
    let fan = objects_dir(repo).join(&CORRUPT_OID[..2]);
    std::fs::create_dir_all(&fan).unwrap();
    std::fs::write(fan.join(&CORRUPT_OID[2..]), b"this is not a zlib stream").unwrap();
}

/// A store with a single alternate pointing at `repo`.
#[allow(dead_code)]
pub fn store_for(repo: &git2::Repository) -> ObjectStore {
    let mut store = ObjectStore::new().unwrap();
    store.add_alternate(objects_dir(repo)).unwrap();
    store
}

/// Everything written to `file` so far.
#[allow(dead_code)]
pub fn contents(file: &mut File) -> Vec<u8> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0)).unwrap();
    file.read_to_end(&mut buf).unwrap();
    buf
}

/// The record `cat-file --batch` prints for an object.
#[allow(dead_code)]
pub fn expected_record(oid: &str, kind: &str, data: &[u8]) -> Vec<u8> {
    let mut out = format!("{} {} {}\n", oid, kind, data.len()).into_bytes();
    out.extend_from_slice(data);
    out.push(b'\n');
    out
}
