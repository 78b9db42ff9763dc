use daraz_scraper::{DarazScraper, Scraper, ScraperConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wireless mouse".to_string());

    // Headful for debugging
    let config = ScraperConfig::new().with_headless(false).with_debug(true);
    let mut scraper = DarazScraper::new(config);

    println!("=== Daraz Search Demo ===");

    match scraper.execute(&query).await {
        Ok(artifact) => {
            println!("Found {} products", artifact.products.len());
            for p in &artifact.products {
                println!("  {} | {} | {}", p.title, p.price, p.link);
            }
            println!("Screenshot: {:?}", artifact.screenshot_path);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }
}
