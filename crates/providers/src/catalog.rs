//! Catalog sources. Every call fetches fresh; nothing is cached here.

use reqwest::Client;
use shared::catalog::{CatalogDocument, Product};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::shared_http;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cannot read catalog file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Where the products come from, for logs
    fn source(&self) -> String;

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;
}

pub struct HttpCatalogProvider {
    http: Client,
    url: String,
    timeout: Duration,
}

impl HttpCatalogProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: shared_http(),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalogProvider {
    fn source(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let resp = self
            .http
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let text = resp.text().await?;
        let doc: CatalogDocument = serde_json::from_str(&text)?;
        Ok(doc.products)
    }
}

/// Catalog stored as a JSON document on disk
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FileCatalogProvider {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Read {
                path: self.path.clone(),
                source,
            })?;
        let doc: CatalogDocument = serde_json::from_str(&text)?;
        Ok(doc.products)
    }
}

/// Pick a provider for `source`: http(s) URLs go over the network, anything else is a file path.
pub fn from_source(source: &str, timeout: Duration) -> Arc<dyn CatalogProvider> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Arc::new(HttpCatalogProvider::new(source, timeout))
    } else {
        Arc::new(FileCatalogProvider::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_provider_reads_products() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"products": [
                {{"id": 1, "name": "Foam", "brand": "Acme", "category": "Cleanser",
                  "image": "https://img.test/1.png", "description": "Daily foam"}},
                {{"id": 2, "name": "Drops", "brand": "Acme", "category": "Serum",
                  "image": "https://img.test/2.png", "description": "Vitamin C"}}
            ]}}"#
        )
        .unwrap();

        let provider = FileCatalogProvider::new(file.path());
        let products = provider.fetch().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Drops");
    }

    #[tokio::test]
    async fn test_file_provider_rejects_wrong_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"items": []}}"#).unwrap();

        let err = FileCatalogProvider::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCatalogProvider::new(dir.path().join("nope.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_from_source_picks_backend() {
        let timeout = Duration::from_secs(5);
        assert_eq!(
            from_source("https://shop.test/products.json", timeout).source(),
            "https://shop.test/products.json"
        );
        assert_eq!(from_source("data/products.json", timeout).source(), "data/products.json");
    }
}
