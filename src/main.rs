//! Command-line entry point: one optional positional argument, the search
//! query. Defaults to "wireless mouse".

use daraz_scraper::{DarazScraper, Scraper, ScraperConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,daraz_scraper=debug")),
        )
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wireless mouse".to_string());

    let mut scraper = DarazScraper::new(ScraperConfig::new());

    match scraper.execute(&query).await {
        Ok(artifact) => {
            info!("Scraping completed: {} products", artifact.products.len());
            for (i, p) in artifact.products.iter().enumerate() {
                println!("\nProduct #{}", i + 1);
                println!("  Title:  {}", p.title);
                println!("  Price:  {}", p.price);
                println!("  Rating: {}", p.rating);
                println!("  Link:   {}", p.link);
            }
            println!("\nScreenshot: {:?}", artifact.screenshot_path);
            println!("Results:    {:?}", artifact.results_path);
        }
        Err(e) => {
            error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    }
}
