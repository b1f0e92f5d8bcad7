use async_trait::async_trait;
use nd_core::corpus::{parse_articles, parse_timeline};
use nd_core::{Article, ArticleStorage, Error, Result, TimelineEvent};
use std::path::Path;
use tracing::info;
use crate::backends::memory::MemoryStorage;

/// Loads a corpus from a JSON article file and an optional timeline file.
///
/// The files are read once; the corpus is immutable afterwards.
pub struct JsonFileStorage {
    inner: MemoryStorage,
}

impl JsonFileStorage {
    pub async fn open(articles_path: &Path, timeline_path: Option<&Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(articles_path).await.map_err(|e| {
            Error::Storage(format!("Failed to read {}: {}", articles_path.display(), e))
        })?;
        let articles = parse_articles(&raw)?;

        let timeline = match timeline_path {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
                    Error::Storage(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_timeline(&raw, &articles)?
            }
            None => Vec::new(),
        };

        info!(
            "📚 Loaded {} articles and {} timeline events from {}",
            articles.len(),
            timeline.len(),
            articles_path.display()
        );

        Ok(Self {
            inner: MemoryStorage::with_corpus(articles, timeline),
        })
    }
}

#[async_trait]
impl ArticleStorage for JsonFileStorage {
    async fn articles(&self) -> Result<Vec<Article>> {
        self.inner.articles().await
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        self.inner.get_article(id).await
    }

    async fn timeline(&self) -> Result<Vec<TimelineEvent>> {
        self.inner.timeline().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::corpus::builtin_articles;

    #[tokio::test]
    async fn test_loads_articles_and_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let articles_path = dir.path().join("articles.json");
        let timeline_path = dir.path().join("timeline.json");

        let articles: Vec<Article> = builtin_articles().unwrap().into_iter().take(2).collect();
        std::fs::write(&articles_path, serde_json::to_string(&articles).unwrap()).unwrap();
        std::fs::write(
            &timeline_path,
            r#"[{"id":"t9","date":"2025-01-15","title":"Earnings","summary":"Quarterly results","articleIds":["2"],"significance":"low"}]"#,
        )
        .unwrap();

        let storage = JsonFileStorage::open(&articles_path, Some(&timeline_path))
            .await
            .unwrap();
        assert_eq!(storage.articles().await.unwrap().len(), 2);
        let timeline = storage.timeline().await.unwrap();
        assert_eq!(timeline[0].articles[0].id, "2");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileStorage::open(&dir.path().join("nope.json"), None).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = JsonFileStorage::open(&path, None).await;
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
