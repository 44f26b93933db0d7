//! Scan configuration.

use chrono::Duration;

/// Tunables for the scan pipeline.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions recognized as media, lowercased without the dot.
    pub media_extensions: Vec<String>,

    /// How far a file's modification time may drift from the catalogued
    /// value before the file counts as changed. Absorbs filesystem
    /// timestamp truncation; policy, not invariant.
    pub modified_tolerance: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            media_extensions: vec![
                "mp3".to_string(),
                "flac".to_string(),
                "ogg".to_string(),
                "oga".to_string(),
                "opus".to_string(),
                "m4a".to_string(),
                "m4b".to_string(),
                "aac".to_string(),
                "wav".to_string(),
                "wma".to_string(),
                "alac".to_string(),
                "aiff".to_string(),
                "aif".to_string(),
                "ape".to_string(),
                "wv".to_string(),
            ],
            modified_tolerance: Duration::seconds(1),
        }
    }
}

impl ScanConfig {
    /// Whether a path's extension is on the media allow-list.
    pub fn is_media_extension(&self, path: &str) -> bool {
        let Some(extension) = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
        else {
            return false;
        };
        let extension = extension.to_lowercase();
        self.media_extensions.iter().any(|e| *e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_extension_matching() {
        let config = ScanConfig::default();

        assert!(config.is_media_extension("/music/a/track.mp3"));
        assert!(config.is_media_extension("/music/a/TRACK.FLAC"));
        assert!(!config.is_media_extension("/music/a/cover.jpg"));
        assert!(!config.is_media_extension("/music/a/noextension"));
    }

    #[test]
    fn test_default_tolerance_is_one_second() {
        assert_eq!(ScanConfig::default().modified_tolerance, Duration::seconds(1));
    }
}
