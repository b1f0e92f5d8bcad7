use async_trait::async_trait;
use crate::types::{Article, TimelineEvent};
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Every article in corpus order
    async fn articles(&self) -> Result<Vec<Article>>;

    /// Get a single article by id
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Timeline events linked to the stored articles
    async fn timeline(&self) -> Result<Vec<TimelineEvent>>;
}
