/// Public URL rule: `{base}/{key}` with every path segment percent-encoded.
///
/// Media names come straight from uploads (`bom_dia (1).gif`), so spaces
/// and reserved characters have to be escaped, while `/` keeps its meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrl {
    base: String,
}

impl PublicUrl {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url_for(&self, key: &str) -> String {
        let path = key
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", self.base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_segments_but_keeps_slashes() {
        let url = PublicUrl::new("https://cdn.example.com/media/");
        assert_eq!(
            url.url_for("bom-dia/bom_dia (1).gif"),
            "https://cdn.example.com/media/bom-dia/bom_dia%20%281%29.gif"
        );
        assert_eq!(
            url.url_for("/root.png"),
            "https://cdn.example.com/media/root.png"
        );
    }
}
