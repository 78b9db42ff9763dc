use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::ScraperConfig;
use crate::daraz::{DarazScraper, SearchArtifact};
use crate::error::ScraperError;
use crate::traits::Scraper;

/// One search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub headless: bool,
    pub dedupe_containers: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            headless: true,
            dedupe_containers: false,
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_dedupe_containers(mut self, dedupe: bool) -> Self {
        self.dedupe_containers = dedupe;
        self
    }
}

impl From<&SearchRequest> for ScraperConfig {
    fn from(req: &SearchRequest) -> Self {
        ScraperConfig::new()
            .with_headless(req.headless)
            .with_dedupe_containers(req.dedupe_containers)
    }
}

/// tower::Service wrapper around the scraper.
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // Reserved for future state (rate limiting, session reuse).
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<SearchRequest> for ScraperService {
    type Response = SearchArtifact;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: SearchRequest) -> Self::Future {
        info!("Search request received: query={:?}", req.query);

        Box::pin(async move {
            let config: ScraperConfig = (&req).into();
            let mut scraper = DarazScraper::new(config);

            let artifact = scraper.execute(&req.query).await?;

            info!(
                "Search completed: {} products, screenshot={:?}",
                artifact.products.len(),
                artifact.screenshot_path
            );

            Ok(artifact)
        })
    }
}
