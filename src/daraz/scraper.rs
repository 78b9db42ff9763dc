//! Daraz search workflow.
//!
//! Sequences navigation, search submission, settle waits, screenshot capture,
//! snapshot extraction and persistence. All selector knowledge lives in
//! [`crate::selectors`]; this module only drives the browser.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use chrono::Utc;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::extract;
use crate::traits::Scraper;

use super::types::{sanitize_query, ProductListing, SearchArtifact};

/// Fixed user agent; the site serves a degraded page to obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const WINDOW_WIDTH: u32 = 1920;
const WINDOW_HEIGHT: u32 = 1080;

const SEARCH_INPUT_PRIMARY: &str = "input#q";
const SEARCH_INPUT_FALLBACK: &str = r#"input[type="search"]"#;

/// Poll interval for element and load-state waits.
const POLL_INTERVAL_MS: u64 = 500;

/// Daraz search results scraper.
pub struct DarazScraper {
    config: ScraperConfig,
    browser: Option<Browser>,
    page: Option<Arc<Page>>,
}

impl DarazScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            browser: None,
            page: None,
        }
    }

    fn get_page(&self) -> Result<&Arc<Page>, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("browser not initialized".into()))
    }

    /// Build the launch configuration. The builder defaults to headless, so
    /// headful mode needs the explicit `with_head` override.
    fn browser_config(&self) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .no_sandbox()
            .arg(format!("--user-agent={}", USER_AGENT))
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))
    }

    /// Locate the search input, trying the alternate selector once before
    /// giving up.
    async fn find_search_input(&self, page: &Page) -> Result<Element, ScraperError> {
        match self.wait_for_element(page, SEARCH_INPUT_PRIMARY).await {
            Ok(el) => Ok(el),
            Err(_) => {
                info!("Primary search selector missed, trying alternative...");
                self.wait_for_element(page, SEARCH_INPUT_FALLBACK)
                    .await
                    .map_err(|_| {
                        ScraperError::SearchInput(format!(
                            "no search input matched {} or {}",
                            SEARCH_INPUT_PRIMARY, SEARCH_INPUT_FALLBACK
                        ))
                    })
            }
        }
    }

    /// Poll for an element until the search-input timeout elapses.
    async fn wait_for_element(
        &self,
        page: &Page,
        selector: &str,
    ) -> Result<Element, ScraperError> {
        let timeout = self.config.search_input_timeout;
        let start = Instant::now();
        loop {
            match page.find_element(selector).await {
                Ok(el) => return Ok(el),
                Err(_) if start.elapsed() < timeout => {
                    sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
                }
                Err(e) => {
                    return Err(ScraperError::ElementNotFound(format!("{}: {}", selector, e)))
                }
            }
        }
    }

    /// Wait for the document to reach at least domcontentloaded.
    async fn wait_for_load(&self, page: &Page) -> Result<(), ScraperError> {
        let start = Instant::now();
        while start.elapsed() < self.config.navigation_timeout {
            let ready = page
                .evaluate("document.readyState")
                .await
                .map_err(|e| ScraperError::JavaScript(e.to_string()))?
                .into_value::<String>()
                .unwrap_or_default();

            if ready == "interactive" || ready == "complete" {
                debug!("Document ready after {:?} (state={})", start.elapsed(), ready);
                return Ok(());
            }
            sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
        Err(ScraperError::Timeout(format!(
            "page did not finish loading within {:?}",
            self.config.navigation_timeout
        )))
    }

    /// Current page URL, for diagnostics.
    async fn current_url(&self, page: &Page) -> String {
        page.evaluate("window.location.href")
            .await
            .ok()
            .and_then(|v| v.into_value::<String>().ok())
            .unwrap_or_default()
    }

    async fn capture_screenshot(
        &self,
        page: &Page,
        stem: &str,
    ) -> Result<PathBuf, ScraperError> {
        std::fs::create_dir_all(&self.config.screenshot_dir)?;

        let path = self
            .config
            .screenshot_dir
            .join(format!("{}_{}.png", stem, Utc::now().timestamp_millis()));

        let bytes = page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| ScraperError::Screenshot(e.to_string()))?;
        std::fs::write(&path, &bytes)?;
        info!("Screenshot saved: {:?}", path);

        if self.config.debug {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            debug!("Results screenshot: data:image/png;base64,{}", encoded);
        }

        Ok(path)
    }

    fn persist_results(
        &self,
        stem: &str,
        products: &[ProductListing],
    ) -> Result<PathBuf, ScraperError> {
        std::fs::create_dir_all(&self.config.results_dir)?;

        let path = self
            .config
            .results_dir
            .join(format!("{}_{}.json", stem, Utc::now().timestamp_millis()));

        let json = serde_json::to_string_pretty(products)?;
        std::fs::write(&path, json)?;
        info!("Results saved: {:?}", path);

        Ok(path)
    }
}

#[async_trait]
impl Scraper for DarazScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        info!("Initializing browser...");

        let browser_config = self.browser_config()?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        self.browser = Some(browser);
        self.page = Some(Arc::new(page));

        info!("Browser initialized");
        Ok(())
    }

    async fn search(&mut self, query: &str) -> Result<SearchArtifact, ScraperError> {
        let page = self.get_page()?.clone();
        info!("Searching for {:?} on Daraz", query);

        page.goto(&self.config.base_url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        debug!("Landed on {}", self.current_url(&page).await);

        let input = match self.find_search_input(&page).await {
            Ok(input) => input,
            Err(e) => {
                info!("Search input not found at {}", self.current_url(&page).await);
                return Err(e);
            }
        };
        input
            .type_str(query)
            .await
            .map_err(|e| ScraperError::SearchInput(e.to_string()))?;
        input
            .press_key("Enter")
            .await
            .map_err(|e| ScraperError::SearchInput(e.to_string()))?;

        info!("Waiting for search results...");
        self.wait_for_load(&page).await?;
        sleep(self.config.settle_delay).await;

        let stem = sanitize_query(query);
        let screenshot_path = self.capture_screenshot(&page, &stem).await?;

        sleep(self.config.extraction_delay).await;
        let html = page
            .content()
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        let products = extract::extract_products(&html, self.config.dedupe_containers);
        if products.is_empty() {
            info!(
                "No products extracted; check the screenshot. Current URL: {}",
                self.current_url(&page).await
            );
        }

        let results_path = self.persist_results(&stem, &products)?;

        Ok(SearchArtifact {
            products,
            screenshot_path,
            results_path,
        })
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser...");
        self.page = None;
        self.browser = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daraz_scraper_new() {
        let scraper = DarazScraper::new(ScraperConfig::default());
        assert!(scraper.browser.is_none());
        assert!(scraper.page.is_none());
    }

    #[test]
    fn test_headful_config_overrides_headless_default() {
        let scraper = DarazScraper::new(ScraperConfig::new().with_headless(false));
        let config = scraper.browser_config().expect("config should build");
        assert!(format!("{:?}", config).contains("headless: False"));
    }

    #[test]
    fn test_headless_config_keeps_headless_default() {
        let scraper = DarazScraper::new(ScraperConfig::default());
        let config = scraper.browser_config().expect("config should build");
        assert!(!format!("{:?}", config).contains("headless: False"));
    }

    #[tokio::test]
    #[ignore] // live-site run: cargo test test_daraz_search -- --ignored --nocapture
    async fn test_daraz_search() {
        tracing_subscriber::fmt()
            .with_env_filter("info,daraz_scraper=debug")
            .init();

        let config = ScraperConfig::new()
            .with_headless(true)
            .with_debug(true);
        let mut scraper = DarazScraper::new(config);

        let artifact = scraper
            .execute("wireless mouse")
            .await
            .expect("search failed");

        println!("\n=== Search Result ===");
        println!("Products: {}", artifact.products.len());
        for p in &artifact.products {
            println!("  - {} | {} | {}", p.title, p.price, p.link);
        }
        assert!(artifact.products.len() <= 10);
        assert!(artifact.screenshot_path.exists());
        assert!(artifact.results_path.exists());
    }
}
