use gallery_axum::{axum, AxumApp};
use gallery_core::{GalleryApp, GalleryConfig};

pub fn gallery_app(config: GalleryConfig) -> AxumApp {
    let app = GalleryApp::with_config(config);
    axum(app)
}
