// Crawl a storefront from its homepage, write the sorted sitemap, and
// extract product records for every /products/ page via the configured
// extraction service.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use storescrape::ScrapeConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Homepage URL to crawl (http:// is assumed when no scheme is given)
    url: String,

    /// Output directory; defaults to the seed host name
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Maximum concurrent crawl fetches
    #[arg(long, default_value_t = 16)]
    concurrency: usize,

    /// Extraction model name
    #[arg(long, default_value = storescrape::extraction::DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Fail before any crawling begins; nothing downstream can recover
    // from missing credentials.
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY is not set (checked the environment and .env)")?;

    let mut builder = ScrapeConfig::builder()
        .start_url(&args.url)
        .max_concurrent_fetches(args.concurrency)
        .api_key(api_key)
        .model(&args.model);
    if let Some(dir) = args.output_dir {
        builder = builder.output_dir(dir);
    }
    let config = builder.build()?;

    storescrape::run(config).await?;
    Ok(())
}
