use std::sync::Arc;

use parking_lot::RwLock;

use crate::GalleryConfig;

struct GalleryAppInner {
    config: RwLock<GalleryConfig>,
}

/// Central application container.
///
/// Framework-agnostic and cheap to clone; every clone shares the same
/// configuration store.
#[derive(Clone)]
pub struct GalleryApp {
    inner: Arc<GalleryAppInner>,
}

impl Default for GalleryApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryApp {
    pub fn new() -> Self {
        Self::with_config(GalleryConfig::new())
    }

    pub fn with_config(config: GalleryConfig) -> Self {
        Self {
            inner: Arc::new(GalleryAppInner {
                config: RwLock::new(config),
            }),
        }
    }

    /// Feathers: `app.set(key, value)`
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.config.write().set(key, value);
    }

    /// Feathers: `app.get(key)`
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.config.read().get(key).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_configuration() {
        let app = GalleryApp::new();
        let other = app.clone();

        app.set("http.port", "3030");
        assert_eq!(other.get("http.port").as_deref(), Some("3030"));
        assert_eq!(app.get("missing"), None);
    }
}
