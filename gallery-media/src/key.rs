use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// `update_<N>.<ext>` (or `update-<N>`) at the very end of a key. The
/// marker starts the name or follows a non-alphanumeric separator.
static VERSION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])update[_-]([0-9]+)\.(?:png|jpe?g|gif|webp|mp4|mov|webm)$")
        .expect("version tag pattern is valid")
});

/// Extracts version tags from object keys.
pub struct KeyParser;

impl KeyParser {
    /// The `N` of a trailing `update_<N>.<ext>`, or `None`.
    ///
    /// Never fails: keys without the convention, with an extension outside
    /// the whitelist, or with a tag too large for `u64` all yield `None`.
    pub fn version_tag(key: &str) -> Option<u64> {
        let digits = VERSION_TAG.captures(key)?.get(1)?.as_str();
        match digits.parse::<u64>() {
            Ok(tag) => Some(tag),
            Err(e) => {
                debug!(key = %key, error = %e, "ignoring unparseable version tag");
                None
            }
        }
    }
}

/// Lower-cased extension of the file-name part of `key`.
///
/// Dots in parent "directories" and leading dots of hidden files don't count.
fn extension_of(key: &str) -> Option<String> {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => {
            Some(file_name[idx + 1..].to_ascii_lowercase())
        }
        _ => None,
    }
}

/// An object key with the attributes derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaKey {
    key: String,
    category: String,
    extension: Option<String>,
    version_tag: Option<u64>,
}

impl MediaKey {
    pub fn parse(key: impl Into<String>) -> Self {
        let key = key.into();
        let category = match key.split_once('/') {
            Some((category, _)) => category.to_string(),
            None => String::new(),
        };
        Self {
            extension: extension_of(&key),
            version_tag: KeyParser::version_tag(&key),
            category,
            key,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// First path segment; empty for keys at the bucket root.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn version_tag(&self) -> Option<u64> {
        self.version_tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_the_suffix_grammar() {
        assert_eq!(KeyParser::version_tag("bom-dia/flores_update_7.png"), Some(7));
        assert_eq!(KeyParser::version_tag("bom-dia/UPDATE-12.JPEG"), Some(12));
        assert_eq!(KeyParser::version_tag("a/update_007.webm"), Some(7));
        assert_eq!(KeyParser::version_tag("a/x_update_3.mp4"), Some(3));
        assert_eq!(KeyParser::version_tag("update_5.gif"), Some(5));
        assert_eq!(KeyParser::version_tag("a/x.update-9.mov"), Some(9));
    }

    #[test]
    fn absent_without_the_convention() {
        for key in [
            "bom-dia/flores.png",
            "bom-dia/update_.png",
            "bom-dia/update_3.txt",
            "bom-dia/update_3.png.bak",
            "bom-dia/update_3png",
            "bom-dia/upd_3.png",
            "bom-dia/notupdate_3.png",
            "bom-dia/xUPDATE_3.png",
            "bom-dia/2update_3.png",
            "",
        ] {
            assert_eq!(KeyParser::version_tag(key), None, "{key}");
        }
    }

    #[test]
    fn overflowing_tags_are_absent() {
        let key = format!("a/update_{}.png", "9".repeat(40));
        assert_eq!(KeyParser::version_tag(&key), None);
    }

    #[test]
    fn media_key_attributes() {
        let key = MediaKey::parse("boa-noite/v1.2/Lua_update_4.GIF");
        assert_eq!(key.category(), "boa-noite");
        assert_eq!(key.extension(), Some("gif"));
        assert_eq!(key.version_tag(), Some(4));

        let root = MediaKey::parse("banner");
        assert_eq!(root.category(), "");
        assert_eq!(root.extension(), None);
        assert_eq!(root.version_tag(), None);

        assert_eq!(extension_of("dir.d/.hidden"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    proptest! {
        #[test]
        fn extracts_every_well_formed_tag(
            stem in "([a-z0-9/_-]{0,19}[/_-])?",
            tag in 0u64..=u64::MAX,
            ext in prop::sample::select(vec!["png", "jpg", "JPEG", "gif", "webp", "mp4", "MOV", "webm"]),
            sep in prop::sample::select(vec!["_", "-"]),
        ) {
            let key = format!("{stem}update{sep}{tag}.{ext}");
            prop_assert_eq!(KeyParser::version_tag(&key), Some(tag));
        }

        #[test]
        fn rejects_other_extensions_next_to_digits(
            tag in 0u64..1_000_000,
            ext in "(txt|pdf|svg|bmp|heic|zip)",
        ) {
            let key = format!("cat/update_{tag}.{ext}");
            prop_assert_eq!(KeyParser::version_tag(&key), None);
        }

        #[test]
        fn never_panics(key in ".*") {
            let _ = MediaKey::parse(key);
        }
    }
}
