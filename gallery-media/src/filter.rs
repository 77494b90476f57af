use std::collections::BTreeSet;

use crate::MediaKey;

pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "mp4", "mov", "webm"];

/// Accepts keys whose extension is in the allowed set (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFilter {
    extensions: BTreeSet<String>,
}

impl MediaFilter {
    /// Build from extensions with or without the leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn accepts(&self, key: &MediaKey) -> bool {
        key.extension().is_some_and(|ext| self.extensions.contains(ext))
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(filter: &MediaFilter, key: &str) -> bool {
        filter.accepts(&MediaKey::parse(key))
    }

    #[test]
    fn default_set_covers_images_gifs_and_videos() {
        let filter = MediaFilter::default();
        assert!(accepts(&filter, "bom-dia/a.PNG"));
        assert!(accepts(&filter, "bom-dia/b.jpeg"));
        assert!(accepts(&filter, "bom-dia/c.webm"));
        assert!(!accepts(&filter, "bom-dia/notes.txt"));
        assert!(!accepts(&filter, "bom-dia/"));
        assert!(!accepts(&filter, "bom-dia.png/README"));
    }

    #[test]
    fn custom_sets_are_normalized() {
        let filter = MediaFilter::new([".GIF", " png ", ""]);
        assert_eq!(filter.extensions().collect::<Vec<_>>(), vec!["gif", "png"]);
        assert!(accepts(&filter, "x/y.gif"));
        assert!(!accepts(&filter, "x/y.jpg"));
    }
}
