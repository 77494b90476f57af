use serde::{Deserialize, Serialize};

use crate::{BlobError, BlobResult, PublicUrl};

/// Configuration for S3-compatible access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket holding the media
    pub bucket: String,

    /// AWS region
    pub region: String,

    /// Custom endpoint URL (MinIO, RustFS, DigitalOcean Spaces, ...)
    pub endpoint: Option<String>,

    /// Explicit access key (falls back to the default provider chain)
    pub access_key: Option<String>,

    /// Explicit secret key
    pub secret_key: Option<String>,

    /// Base URL objects are publicly served from (CDN or bucket website)
    pub public_url: Option<String>,

    /// Path-style addressing, required by most self-hosted stores
    pub path_style: bool,

    /// Per-operation timeout in seconds
    pub timeout_secs: u64,

    /// Total attempts per request, retries included
    pub max_attempts: u32,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            public_url: None,
            path_style: false,
            timeout_secs: 30,
            max_attempts: 3,
        }
    }
}

impl S3Config {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = Some(public_url.into());
        self
    }

    pub fn with_path_style(mut self, path_style: bool) -> Self {
        self.path_style = path_style;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self) -> BlobResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(BlobError::config("bucket name is required"));
        }
        if self.max_attempts == 0 {
            return Err(BlobError::config("max_attempts must be at least 1"));
        }
        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(BlobError::config(
                "access_key and secret_key must be provided together",
            ));
        }
        Ok(())
    }

    /// URL rule for this bucket.
    ///
    /// Explicit `public_url` wins; otherwise a custom endpoint is addressed
    /// path-style (`{endpoint}/{bucket}`), and plain AWS virtual-host style.
    pub fn public_url(&self) -> PublicUrl {
        if let Some(base) = &self.public_url {
            return PublicUrl::new(base.clone());
        }
        match &self.endpoint {
            Some(endpoint) => PublicUrl::new(format!(
                "{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket
            )),
            None => PublicUrl::new(format!(
                "https://{}.s3.{}.amazonaws.com",
                self.bucket, self.region
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_precedence() {
        let aws = S3Config::new("gallery").with_region("sa-east-1");
        assert_eq!(
            aws.public_url().base(),
            "https://gallery.s3.sa-east-1.amazonaws.com"
        );

        let minio = S3Config::new("gallery").with_endpoint("http://localhost:9000/");
        assert_eq!(minio.public_url().base(), "http://localhost:9000/gallery");

        let cdn = minio.with_public_url("https://cdn.example.com");
        assert_eq!(cdn.public_url().base(), "https://cdn.example.com");
    }

    #[test]
    fn validation_catches_half_configured_credentials() {
        assert!(S3Config::new("").validate().is_err());
        assert!(S3Config::new("b").with_max_attempts(0).validate().is_err());

        let mut half = S3Config::new("b");
        half.access_key = Some("ak".into());
        assert!(half.validate().is_err());

        assert!(S3Config::new("b").with_credentials("ak", "sk").validate().is_ok());
    }
}
