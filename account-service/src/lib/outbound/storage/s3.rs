use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::account::errors::StorageError;
use crate::account::models::StoredObject;
use crate::account::ports::ObjectStorage;
use crate::config::StorageConfig;

/// S3-compatible object storage for uploaded files.
///
/// Objects are written public-read and addressed through `public_base_url`.
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStorage {
    /// Build a client from the ambient AWS credential chain and the storage config.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Self::new(
            Client::from_conf(s3_config),
            config.bucket.clone(),
            config.public_base_url.clone(),
        )
    }

    pub fn new(client: Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(bucket = %self.bucket, key, error = %e, "Object upload failed");
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::debug!(bucket = %self.bucket, key, size, "Object uploaded");

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }
}
