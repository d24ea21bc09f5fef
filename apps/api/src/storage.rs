use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;

/// Object storage for uploaded resumes.
#[derive(Clone)]
pub struct ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl ObjectStore {
    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "hrms-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&s3_config),
            bucket: config.s3_bucket.clone(),
            public_base_url: config.s3_public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Stores `bytes` under `path` and returns the URL it can be fetched from.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::S3(format!("upload of {path} failed: {e}")))?;

        info!("Uploaded s3://{}/{}", self.bucket, path);
        Ok(public_url(&self.public_base_url, path))
    }
}

/// Key for an uploaded file: `{principalId}/{timestamp}_{filename}`.
pub fn object_path(principal: Uuid, timestamp_ms: i64, filename: &str) -> String {
    let name: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let name = name.trim();
    let name = if name.is_empty() { "upload" } else { name };
    format!("{principal}/{timestamp_ms}_{name}")
}

fn public_url(base: &str, path: &str) -> String {
    format!("{base}/{path}")
}

#[cfg(test)]
pub mod testing {
    use aws_sdk_s3::config::BehaviorVersion;

    use super::*;

    /// A store pointed at an endpoint nothing listens on; building it makes no calls.
    pub fn offline_store() -> ObjectStore {
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url("http://127.0.0.1:9")
            .build();
        ObjectStore {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: "resumes".to_string(),
            public_base_url: "http://127.0.0.1:9/resumes".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_layout() {
        let principal = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
        assert_eq!(
            object_path(principal, 1_700_000_000_000, "cv.pdf"),
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8/1700000000000_cv.pdf"
        );
    }

    #[test]
    fn test_object_path_flattens_separators() {
        let principal = Uuid::nil();
        let path = object_path(principal, 1, "../../etc/passwd");
        assert_eq!(path, format!("{principal}/1_.._.._etc_passwd"));
        assert_eq!(path.matches('/').count(), 1);
    }

    #[test]
    fn test_object_path_names_blank_files() {
        assert!(object_path(Uuid::nil(), 5, "  ").ends_with("/5_upload"));
    }

    #[test]
    fn test_public_url_joins_base_and_path() {
        assert_eq!(
            public_url("http://localhost:9000/resumes", "a/1_cv.pdf"),
            "http://localhost:9000/resumes/a/1_cv.pdf"
        );
    }
}
