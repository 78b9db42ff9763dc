use async_trait::async_trait;

use crate::daraz::SearchArtifact;
use crate::error::ScraperError;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Launch the browser.
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// Run one search and extract its listings.
    async fn search(&mut self, query: &str) -> Result<SearchArtifact, ScraperError>;

    /// Release the browser session.
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// Full pipeline (initialize → search → close). The session is released
    /// on every exit path, including a failed search.
    async fn execute(&mut self, query: &str) -> Result<SearchArtifact, ScraperError> {
        self.initialize().await?;
        let outcome = self.search(query).await;
        let closed = self.close().await;
        let artifact = outcome?;
        closed?;
        Ok(artifact)
    }
}
