//! Noise filtering for observed paths.
//!
//! Two independent rule sets, both evaluated against the path relative to
//! the folder being scanned: noise directories (extras folders, thumbnail
//! caches, hidden dot-directories) and noise files (hidden/system files,
//! partial-download markers). Pure predicates; no filesystem access.

use regex::Regex;
use std::sync::LazyLock;

use crate::decision::ScanCandidate;
use core_catalog::paths::normalize_path;

static EXCLUDED_SUBFOLDERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\\|/|^)(?:extras|@eadir|extrafanart|plex versions|\.[^\\/]+)(?:\\|/)")
        .expect("excluded-subfolders pattern is a valid literal")
});

static EXCLUDED_FILES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\._|^Thumbs\.db$|^\.DS_store$|\.partial~$")
        .expect("excluded-files pattern is a valid literal")
});

/// Filters observed paths against the noise rule sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFilter;

impl PathFilter {
    /// Whether a file at `path` under `base` should be considered at all.
    pub fn should_include(&self, base: &str, path: &str) -> bool {
        let relative = relative_to(base, path);
        if EXCLUDED_SUBFOLDERS.is_match(&relative) {
            return false;
        }
        !EXCLUDED_FILES.is_match(file_name(path))
    }

    /// Keep only candidates that pass both rule sets.
    pub fn filter_candidates(
        &self,
        base: &str,
        candidates: Vec<ScanCandidate>,
    ) -> Vec<ScanCandidate> {
        candidates
            .into_iter()
            .filter(|candidate| self.should_include(base, &candidate.path))
            .collect()
    }

    /// Keep only paths that pass both rule sets.
    pub fn filter_paths(&self, base: &str, paths: Vec<String>) -> Vec<String> {
        paths
            .into_iter()
            .filter(|path| self.should_include(base, path))
            .collect()
    }
}

fn relative_to(base: &str, path: &str) -> String {
    let base = normalize_path(base);
    let normalized = normalize_path(path);
    match normalized.strip_prefix(&base) {
        Some(rest) => rest.trim_start_matches('/').to_string(),
        None => normalized,
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn included(base: &str, path: &str) -> bool {
        PathFilter.should_include(base, path)
    }

    #[test]
    fn test_accepts_ordinary_files() {
        assert!(included("/music", "/music/Artist/Album/01 - Song.mp3"));
        assert!(included("/music", "/music/track.flac"));
    }

    #[test]
    fn test_rejects_noise_directories() {
        assert!(!included("/music", "/music/Artist/extras/track.mp3"));
        assert!(!included("/music", "/music/@eaDir/thumb.mp3"));
        assert!(!included("/music", "/music/Artist/ExtraFanart/a.mp3"));
        assert!(!included("/music", "/music/Plex Versions/a.mp3"));
        assert!(!included("/music", "/music/.hidden/a.mp3"));
    }

    #[test]
    fn test_noise_directory_outside_base_is_ignored() {
        // An "extras" segment above the scanned folder is not the scan's
        // concern; only the relative portion is evaluated.
        assert!(included("/srv/extras/music", "/srv/extras/music/Artist/a.mp3"));
    }

    #[test]
    fn test_rejects_noise_files() {
        assert!(!included("/music", "/music/Artist/._track.mp3"));
        assert!(!included("/music", "/music/Artist/Thumbs.db"));
        assert!(!included("/music", "/music/Artist/.DS_Store"));
        assert!(!included("/music", "/music/Artist/track.mp3.partial~"));
    }

    #[test]
    fn test_rules_are_case_insensitive() {
        assert!(!included("/music", "/music/Artist/EXTRAS/track.mp3"));
        assert!(!included("/music", "/music/Artist/thumbs.DB"));
    }

    #[test]
    fn test_filter_paths() {
        let paths = vec![
            "/music/a/track.mp3".to_string(),
            "/music/a/extras/skip.mp3".to_string(),
            "/music/a/._skip.mp3".to_string(),
        ];

        let kept = PathFilter.filter_paths("/music", paths);
        assert_eq!(kept, vec!["/music/a/track.mp3".to_string()]);
    }
}
