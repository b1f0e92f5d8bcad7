use async_trait::async_trait;
use nd_core::corpus::{builtin_articles, builtin_timeline};
use nd_core::{Article, ArticleStorage, Result, TimelineEvent};

/// Serves a corpus held in memory, by default the built-in one.
///
/// The corpus is read-only once constructed.
pub struct MemoryStorage {
    articles: Vec<Article>,
    timeline: Vec<TimelineEvent>,
}

impl MemoryStorage {
    pub fn new() -> Result<Self> {
        let articles = builtin_articles()?;
        let timeline = builtin_timeline(&articles)?;
        Ok(Self::with_corpus(articles, timeline))
    }

    pub fn with_corpus(articles: Vec<Article>, timeline: Vec<TimelineEvent>) -> Self {
        Self { articles, timeline }
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn timeline(&self) -> Result<Vec<TimelineEvent>> {
        Ok(self.timeline.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new().unwrap();
        assert_eq!(storage.articles().await.unwrap().len(), 5);

        let article = storage.get_article("2").await.unwrap().unwrap();
        assert_eq!(article.source, "Business Herald");
        assert!(storage.get_article("42").await.unwrap().is_none());

        assert_eq!(storage.timeline().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_corpus() {
        let storage = MemoryStorage::with_corpus(vec![], vec![]);
        assert!(storage.articles().await.unwrap().is_empty());
        assert!(storage.get_article("1").await.unwrap().is_none());
    }
}
