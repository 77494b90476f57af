use async_trait::async_trait;

use crate::BlobResult;

/// Listing primitives every storage backend must provide.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Every object key under `prefix`, in no particular order.
    ///
    /// Implementations must return the complete set in one call, following
    /// continuation tokens internally.
    async fn list_keys(&self, prefix: &str) -> BlobResult<Vec<String>>;

    /// Publicly resolvable URL for `key`. Pure, no I/O.
    fn url_for(&self, key: &str) -> String;
}

/// Object key prefix for a category.
///
/// Categories are folder-like groupings: `bom-dia` lists `bom-dia/`.
/// The empty category addresses the whole bucket.
pub fn category_prefix(category: &str) -> String {
    let trimmed = category.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefix_is_folder_like() {
        assert_eq!(category_prefix("bom-dia"), "bom-dia/");
        assert_eq!(category_prefix("/bom-dia/"), "bom-dia/");
        assert_eq!(category_prefix(""), "");
        assert_eq!(category_prefix("/"), "");
    }
}
