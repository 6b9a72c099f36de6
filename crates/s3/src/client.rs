//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from sm-core.
//! Credentials are resolved through the SDK's standard chain (environment,
//! shared config files, instance metadata); this crate never handles them.

use async_trait::async_trait;

use sm_core::{Error, ListOptions, ListResult, ObjectInfo, ObjectStore, Result};

/// Connection options for the S3 client
///
/// Built by the CLI from command-line flags merged over the config file.
/// Everything here is optional; with all fields unset the SDK behaves
/// exactly as the AWS CLI would in the same environment.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Endpoint URL for self-hosted S3-compatible backends
    pub endpoint_url: Option<String>,

    /// Region override
    pub region: Option<String>,

    /// Use path-style addressing
    pub force_path_style: bool,
}

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from connection options
    pub async fn new(options: ClientOptions) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = options.region {
            loader = loader.region(aws_config::Region::new(region));
        }
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Classify an SDK error by its message text
///
/// The SDK surfaces service errors through nested types whose Display output
/// carries the service error code; matching on the text keeps this adapter
/// independent of the per-operation error enums.
fn classify(target: &str, err: impl std::fmt::Display) -> Error {
    let text = err.to_string();

    if text.contains("NotFound") || text.contains("NoSuchKey") || text.contains("NoSuchBucket") {
        Error::NotFound(target.to_string())
    } else if text.contains("AccessDenied")
        || text.contains("InvalidAccessKeyId")
        || text.contains("SignatureDoesNotMatch")
    {
        Error::Auth(text)
    } else if text.contains("BucketNotEmpty") {
        Error::Conflict(format!("bucket '{target}' is not empty"))
    } else if text.contains("BucketAlreadyOwnedByYou") || text.contains("BucketAlreadyExists") {
        Error::Conflict(format!("bucket '{target}' already exists"))
    } else {
        Error::Network(text)
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => match classify(bucket, &e) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| classify(bucket, &e))?;

        tracing::debug!(bucket, "created bucket");
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| classify(bucket, &e))?;

        tracing::debug!(bucket, "deleted bucket");
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult> {
        let mut request = self.inner.list_objects_v2().bucket(bucket);

        if let Some(max) = options.max_keys {
            request = request.max_keys(max);
        }
        if let Some(token) = &options.continuation_token {
            request = request.continuation_token(token);
        }

        let response = request.send().await.map_err(|e| classify(bucket, &e))?;

        let mut items = Vec::new();
        for object in response.contents() {
            let key = object.key().unwrap_or_default().to_string();
            let size = object.size().unwrap_or(0);
            let mut info = ObjectInfo::new(&key, size);

            if let Some(modified) = object.last_modified() {
                info.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
            }
            if let Some(etag) = object.e_tag() {
                info.etag = Some(etag.trim_matches('"').to_string());
            }

            items.push(info);
        }

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let target = format!("{bucket}/{key}");

        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&target, &e))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        let target = format!("{bucket}/{key}");
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if let Some(ct) = &content_type {
            request = request.content_type(ct);
        }

        let response = request.send().await.map_err(|e| classify(&target, &e))?;

        tracing::debug!(bucket, key, size, "put object");

        let mut info = ObjectInfo::new(key, size);
        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }
        info.content_type = content_type;
        info.last_modified = Some(jiff::Timestamp::now());

        Ok(info)
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        let target = format!("{bucket}/{key}");

        match self
            .inner
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match classify(&target, &e) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        // DeleteObject is idempotent: a missing key still returns 204.
        let target = format!("{bucket}/{key}");

        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&target, &e))?;

        tracing::debug!(bucket, key, "deleted object");
        Ok(())
    }
}
