use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Search page origin.
    pub base_url: String,
    /// Directory for full-page screenshots, created on demand.
    pub screenshot_dir: PathBuf,
    /// Directory for persisted JSON result sets, created on demand.
    pub results_dir: PathBuf,
    pub headless: bool,
    /// Log the captured screenshot as a base64 data URI.
    pub debug: bool,
    /// Bound on full page navigation and load waits.
    pub navigation_timeout: Duration,
    /// Bound on finding a usable search input.
    pub search_input_timeout: Duration,
    /// Unconditional delay after search submission, tolerates client-side
    /// rendering latency.
    pub settle_delay: Duration,
    /// Unconditional delay before the extraction snapshot.
    pub extraction_delay: Duration,
    /// Drop duplicate containers produced by the brute-force discovery tier.
    /// Off by default.
    pub dedupe_containers: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.daraz.pk/".to_string(),
            screenshot_dir: PathBuf::from("./screenshots"),
            results_dir: PathBuf::from("./results"),
            headless: true,
            debug: false,
            navigation_timeout: Duration::from_secs(60),
            search_input_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(4),
            extraction_delay: Duration::from_secs(2),
            dedupe_containers: false,
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_dedupe_containers(mut self, dedupe: bool) -> Self {
        self.dedupe_containers = dedupe;
        self
    }
}
