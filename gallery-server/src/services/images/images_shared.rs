use gallery_core::{ServiceCapabilities, ServiceMethodKind};

/// `GET /images` (whole bucket) and `GET /images/{category}`.
pub fn read_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::from_methods(vec![ServiceMethodKind::Find, ServiceMethodKind::Get])
}

/// Category used for the whole-bucket listing.
pub const ALL_CATEGORIES: &str = "";
