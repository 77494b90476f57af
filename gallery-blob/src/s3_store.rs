use std::time::Duration;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::Client;
use tracing::debug;

use crate::{BlobError, BlobResult, ObjectLister, PublicUrl, S3Config};

/// S3-compatible lister built on the AWS SDK.
///
/// Works against AWS S3 and any store speaking the same API (MinIO,
/// RustFS, Spaces). Retries and the per-operation timeout are configured
/// on the SDK client itself.
#[derive(Clone)]
pub struct S3CompatibleLister {
    client: Client,
    bucket: String,
    urls: PublicUrl,
}

impl S3CompatibleLister {
    pub async fn new(config: S3Config) -> BlobResult<Self> {
        config.validate()?;
        let client = Self::create_client(&config).await;
        Ok(Self {
            client,
            urls: config.public_url(),
            bucket: config.bucket,
        })
    }

    async fn create_client(config: &S3Config) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(config.timeout_secs))
                    .build(),
            );

        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            let credentials = Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "gallery",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let aws_config = loader.load().await;

        Client::from_conf(
            aws_sdk_s3::config::Builder::from(&aws_config)
                .force_path_style(config.path_style)
                .build(),
        )
    }

    fn map_sdk_error<E, R>(err: SdkError<E, R>) -> BlobError
    where
        E: std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        match &err {
            SdkError::TimeoutError(_) => BlobError::Timeout {
                operation: "list_objects_v2",
            },
            SdkError::DispatchFailure(_) => {
                BlobError::unavailable(DisplayErrorContext(&err).to_string())
            }
            _ => BlobError::backend(err),
        }
    }
}

#[async_trait]
impl ObjectLister for S3CompatibleLister {
    async fn list_keys(&self, prefix: &str) -> BlobResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut req = self.client.list_objects_v2().bucket(&self.bucket);

            if !prefix.is_empty() {
                req = req.prefix(prefix);
            }

            if let Some(token) = &continuation_token {
                req = req.continuation_token(token);
            }

            let resp = req.send().await.map_err(Self::map_sdk_error)?;
            pages += 1;

            for obj in resp.contents() {
                let Some(key) = obj.key() else { continue };

                // Skip directory markers and empty keys
                if key.is_empty() || key.ends_with('/') {
                    continue;
                }
                keys.push(key.to_string());
            }

            if resp.is_truncated() == Some(true) {
                continuation_token = resp.next_continuation_token().map(str::to_string);
                if continuation_token.is_none() {
                    break;
                }
            } else {
                break;
            }
        }

        debug!(
            bucket = %self.bucket,
            prefix = %prefix,
            pages,
            keys = keys.len(),
            "listed object keys"
        );
        Ok(keys)
    }

    fn url_for(&self, key: &str) -> String {
        self.urls.url_for(key)
    }
}
