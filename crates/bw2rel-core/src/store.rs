//! Object store client for release publishing.
//!
//! Layout: `bw2/2.x/<platform>/<arch>/<version>/<relative-path>` for
//! versioned artifacts; the single fixed key `agent` for the installer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3 as s3;
use thiserror::Error;
use tokio::io::AsyncReadExt;

use bw2rel_schema::DEFAULT_BUCKET;

/// Size of the read chunks `put_file` reports progress at.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for the release store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// S3-compatible endpoint URL. `None` uses the SDK's default endpoint.
    pub endpoint: Option<String>,
    /// Bucket name (e.g. `get.bw2.io`).
    pub bucket: String,
    /// Access Key ID. When unset, the ambient AWS credential chain is used.
    pub access_key: Option<String>,
    /// Secret Access Key.
    pub secret_key: Option<String>,
    /// Address the bucket with path-style requests.
    ///
    /// Dotted bucket names (`get.bw2.io`) do not match wildcard TLS
    /// certificates under virtual-host addressing, so path-style is the
    /// default. Hostname verification stays enabled either way.
    pub force_path_style: bool,
}

impl StoreConfig {
    /// Load configuration from `BW2REL_STORE_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("BW2REL_STORE_ENDPOINT").ok(),
            bucket: std::env::var("BW2REL_STORE_BUCKET")
                .unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            access_key: std::env::var("BW2REL_STORE_ACCESS_KEY").ok(),
            secret_key: std::env::var("BW2REL_STORE_SECRET_KEY").ok(),
            force_path_style: std::env::var("BW2REL_STORE_PATH_STYLE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            bucket: DEFAULT_BUCKET.to_string(),
            access_key: None,
            secret_key: None,
            force_path_style: true,
        }
    }
}

/// Errors from object store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading a local file failed.
    #[error("failed to read {}", path.display())]
    Io {
        /// Local file being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The store rejected or failed an object write.
    #[error("upload failed for {key}: {message}")]
    Upload {
        /// Remote key the write was addressed to.
        key: String,
        /// Rendered SDK error chain.
        message: String,
    },

    /// The client could not be constructed from the given configuration.
    #[error("store configuration error: {0}")]
    Config(String),
}

/// A key-addressed blob store accepting create/overwrite writes.
///
/// Single-object writes are assumed atomic: a concurrent reader observes
/// either the previous object or the complete new one, never a torn write.
/// The installer overwrite relies on this guarantee.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create or overwrite the object at `key` with `bytes`.
    async fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Create or overwrite the object at `key` from a local file.
    ///
    /// `progress` is invoked periodically with (bytes-read, total) as the
    /// file is ingested.
    async fn put_file(
        &self,
        key: &str,
        path: &Path,
        progress: &(dyn Fn(u64, u64) + Sync),
    ) -> Result<(), StoreError>;
}

/// Client for the S3-compatible release store.
#[derive(Debug)]
pub struct S3Store {
    client: s3::Client,
    bucket: String,
}

impl S3Store {
    /// Create a new release store client.
    ///
    /// Uses explicit credentials when both keys are configured; otherwise
    /// resolves the ambient AWS credential chain (env, profile, instance
    /// role), which is how the release hosts authenticate.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        if config.bucket.is_empty() {
            return Err(StoreError::Config("bucket must not be empty".to_string()));
        }

        let s3_config = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => {
                let credentials = s3::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "bw2rel-store",
                );

                let mut builder = s3::Config::builder()
                    .behavior_version_latest()
                    .region(s3::config::Region::new("auto"))
                    .credentials_provider(credentials)
                    .force_path_style(config.force_path_style);
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.endpoint_url(endpoint);
                }
                builder.build()
            }
            _ => {
                let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                let mut builder =
                    s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.endpoint_url(endpoint);
                }
                builder.build()
            }
        };

        Ok(Self {
            client: s3::Client::from_conf(s3_config),
            bucket: config.bucket,
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let body = s3::primitives::ByteStream::from(bytes);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type("application/octet-stream")
            .send()
            .await
            .map_err(|e| StoreError::Upload {
                key: key.to_string(),
                message: format!("{}", s3::error::DisplayErrorContext(&e)),
            })?;

        Ok(())
    }

    async fn put_file(
        &self,
        key: &str,
        path: &Path,
        progress: &(dyn Fn(u64, u64) + Sync),
    ) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let total = tokio::fs::metadata(path).await.map_err(io_err)?.len();
        let mut file = tokio::fs::File::open(path).await.map_err(io_err)?;

        let mut data = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
        let mut buf = vec![0u8; UPLOAD_CHUNK_SIZE];
        let mut read_total: u64 = 0;
        loop {
            let n = file.read(&mut buf).await.map_err(io_err)?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            read_total += n as u64;
            progress(read_total, total);
        }

        self.put_bytes(key, data).await
    }
}

/// In-memory store that records every write.
///
/// Test double for the publishers; failures can be injected per key to
/// exercise failure policies.
#[derive(Debug, Default)]
pub struct MemoryStore {
    puts: std::sync::Mutex<Vec<(String, Vec<u8>)>>,
    fail_keys: Vec<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write whose key contains `fragment` fail.
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.fail_keys.push(fragment.into());
        self
    }

    /// All recorded writes, in order.
    pub fn puts(&self) -> Vec<(String, Vec<u8>)> {
        self.puts.lock().expect("store lock poisoned").clone()
    }

    /// Keys of all recorded writes, in order.
    pub fn keys(&self) -> Vec<String> {
        self.puts().into_iter().map(|(key, _)| key).collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        if self.fail_keys.iter().any(|f| key.contains(f.as_str())) {
            return Err(StoreError::Upload {
                key: key.to_string(),
                message: "injected failure".to_string(),
            });
        }
        self.puts
            .lock()
            .expect("store lock poisoned")
            .push((key.to_string(), bytes));
        Ok(())
    }

    async fn put_file(
        &self,
        key: &str,
        path: &Path,
        progress: &(dyn Fn(u64, u64) + Sync),
    ) -> Result<(), StoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let total = bytes.len() as u64;
        progress(total, total);
        self.put_bytes(key, bytes).await
    }
}
