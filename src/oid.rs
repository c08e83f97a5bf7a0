//! Exact-width object id parsing.

use crate::types::OID_HEX_LEN;

/// Parse a full hex object id.
///
/// Only exactly [`OID_HEX_LEN`] hex digits (either case) are accepted.
/// `git2::Oid::from_str` would zero-pad a short prefix into a valid looking
/// id, so length and charset are checked here first.
pub fn parse(hex: &[u8]) -> Option<git2::Oid> {
    if hex.len() != OID_HEX_LEN || !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let s = std::str::from_utf8(hex).ok()?;
    git2::Oid::from_str(s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[test]
    fn parses_full_id() {
        let oid = parse(EMPTY_BLOB.as_bytes()).unwrap();
        assert_eq!(oid.to_string(), EMPTY_BLOB);
    }

    #[test]
    fn accepts_uppercase() {
        let oid = parse(EMPTY_BLOB.to_uppercase().as_bytes()).unwrap();
        assert_eq!(oid.to_string(), EMPTY_BLOB);
    }

    #[test]
    fn rejects_prefix() {
        assert!(parse(&EMPTY_BLOB.as_bytes()[..7]).is_none());
        assert!(parse(&EMPTY_BLOB.as_bytes()[..39]).is_none());
    }

    #[test]
    fn rejects_too_long() {
        let long = format!("{}0", EMPTY_BLOB);
        assert!(parse(long.as_bytes()).is_none());
    }

    #[test]
    fn rejects_non_hex() {
        let bad = format!("{}g", &EMPTY_BLOB[..39]);
        assert!(parse(bad.as_bytes()).is_none());
        let bad = format!("{} ", &EMPTY_BLOB[..39]);
        assert!(parse(bad.as_bytes()).is_none());
    }

    #[test]
    fn rejects_empty() {
        assert!(parse(b"").is_none());
    }
}
