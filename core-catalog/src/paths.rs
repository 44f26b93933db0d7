//! Normalization-aware path comparison.
//!
//! Catalog paths may have been written by hosts with different separator and
//! case conventions. Matching an observed file against a catalogued one must
//! not produce a false mismatch on case-insensitive storage, so every
//! comparison in the engine goes through the normalized form.

/// Normalize a path string for equality and prefix comparisons.
///
/// Lowercases, converts backslashes to forward slashes, and strips any
/// trailing separator. The normalized form is for comparison only; it is
/// never written back to the catalog.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.replace('\\', "/").to_lowercase();
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Whether two paths refer to the same file under normalization.
pub fn paths_equal(a: &str, b: &str) -> bool {
    normalize_path(a) == normalize_path(b)
}

/// Whether `child` lies strictly under the directory `base`.
pub fn is_parent(base: &str, child: &str) -> bool {
    let base = normalize_path(base);
    let child = normalize_path(child);
    child.len() > base.len() + 1 && child.starts_with(&base) && child.as_bytes()[base.len()] == b'/'
}

/// Whether `child` is `base` itself or lies under it.
pub fn is_parent_or_self(base: &str, child: &str) -> bool {
    normalize_path(base) == normalize_path(child) || is_parent(base, child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/Music/Artist/"), "/music/artist");
        assert_eq!(normalize_path(r"C:\Music\Artist"), "c:/music/artist");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_paths_equal_across_case_and_separators() {
        assert!(paths_equal("/Music/Artist/track.mp3", "/music/artist/Track.MP3"));
        assert!(paths_equal(r"C:\Music\a.mp3", "c:/music/a.mp3"));
        assert!(!paths_equal("/music/a.mp3", "/music/b.mp3"));
    }

    #[test]
    fn test_is_parent() {
        assert!(is_parent("/music", "/Music/Artist/track.mp3"));
        assert!(is_parent("/music/", "/music/artist"));
        assert!(!is_parent("/music", "/music"));
        // Sibling with a shared name prefix is not a child.
        assert!(!is_parent("/music", "/music-other/track.mp3"));
    }

    #[test]
    fn test_is_parent_or_self() {
        assert!(is_parent_or_self("/music", "/Music/"));
        assert!(is_parent_or_self("/music", "/music/a.mp3"));
        assert!(!is_parent_or_self("/music", "/video/a.mp3"));
    }
}
