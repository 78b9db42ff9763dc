use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("browser init error: {0}")]
    BrowserInit(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("search input error: {0}")]
    SearchInput(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("javascript error: {0}")]
    JavaScript(String),

    #[error("screenshot error: {0}")]
    Screenshot(String),

    #[error("file io error: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
