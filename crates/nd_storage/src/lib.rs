use nd_core::{ArticleStorage, Error, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

/// Opens the backend named `kind` (`memory` or `json`).
pub async fn create_storage(
    kind: &str,
    corpus_path: Option<&Path>,
    timeline_path: Option<&Path>,
) -> Result<Arc<dyn ArticleStorage>> {
    let storage: Arc<dyn ArticleStorage> = match kind {
        "memory" => Arc::new(MemoryStorage::new()?),
        "json" => {
            let path = corpus_path.ok_or_else(|| {
                Error::Storage("JSON storage needs a corpus file (--corpus)".to_string())
            })?;
            Arc::new(JsonFileStorage::open(path, timeline_path).await?)
        }
        other => {
            return Err(Error::Storage(format!(
                "Unknown storage backend: {} (available: memory, json)",
                other
            )))
        }
    };
    info!("🏦 Storage backend ready (using {})", kind);
    Ok(storage)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_storage() {
        let storage = create_storage("memory", None, None).await.unwrap();
        assert_eq!(storage.articles().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_json_requires_path() {
        let err = create_storage("json", None, None).await.err().unwrap();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("--corpus"));
    }

    #[tokio::test]
    async fn test_unknown_backend() {
        let err = create_storage("qdrant", None, None).await.err().unwrap();
        assert!(err.to_string().contains("Unknown storage backend"));
    }
}
