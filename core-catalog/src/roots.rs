//! Root folder directory.
//!
//! Resolves a scan target to the single configured root folder that owns it.
//! Resolution is longest-prefix: when roots nest (misconfigured but legal),
//! the most specific root wins.

use crate::models::RootFolder;
use crate::paths::is_parent_or_self;

/// Read-only view over the configured root folders.
#[derive(Debug, Clone, Default)]
pub struct RootFolderDirectory {
    roots: Vec<RootFolder>,
}

impl RootFolderDirectory {
    pub fn new(roots: Vec<RootFolder>) -> Self {
        Self { roots }
    }

    /// Every configured root folder.
    pub fn all(&self) -> &[RootFolder] {
        &self.roots
    }

    /// Resolve the best-matching root folder for `path`.
    ///
    /// Candidates are ordered by path length descending so the most specific
    /// prefix match is returned. `None` means the path lies outside every
    /// configured root and must not be scanned.
    pub fn resolve_best_match(&self, path: &str) -> Option<&RootFolder> {
        let mut candidates: Vec<&RootFolder> = self.roots.iter().collect();
        candidates.sort_by_key(|root| std::cmp::Reverse(root.path.len()));

        candidates
            .into_iter()
            .find(|root| is_parent_or_self(&root.path, path))
    }
}
