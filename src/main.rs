//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest product scraper.

use catalog_harvest::config::{load_config_with_hash, Config, OutputFormat};
use catalog_harvest::crawler::{harvest, Coordinator};
use catalog_harvest::output::print_statistics;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a polite product catalog scraper
///
/// Catalog-Harvest walks the paginated category listings of a catalog site,
/// extracts a structured record from every product page it finds, and writes
/// the records as JSON or CSV.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite product catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without any network access
    #[arg(long, conflicts_with = "discover_only")]
    dry_run: bool,

    /// Only discover product URLs and print them
    #[arg(long, conflicts_with = "dry_run")]
    discover_only: bool,

    /// Output file (overrides the [output] table)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format (overrides the [output] table)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

/// Output formats accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.to_string_lossy().into_owned());
    }

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.discover_only {
        handle_discover(config).await?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Delay after each request: {}-{}ms",
        config.crawler.min_delay_ms,
        config.crawler.effective_max_delay_ms()
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nStart URLs ({}):", config.crawler.start_urls.len());
    for url in &config.crawler.start_urls {
        println!("  - {}", url);
    }

    println!("\nUser Agents ({}):", config.user_agent.agents.len());
    for agent in &config.user_agent.agents {
        println!("  - {}", agent);
    }
    println!("  Accept-Language: {}", config.user_agent.accept_language);

    println!("\nOutput:");
    println!("  Format: {}", config.output.format);
    println!("  Path: {}", config.output.output_path().display());
    if config.output.download_images {
        println!("  Images: {}", config.output.images_dir);
    } else {
        println!("  Images: not downloaded");
    }

    println!("\nExtraction:");
    println!("  Product path marker: {}", config.extraction.product_path_marker);
    println!("  Advantages heading: {}", config.extraction.advantages_heading);
    println!(
        "  Technical info heading: {}",
        config.extraction.technical_info_heading
    );
    println!("  Brand label: {}", config.extraction.brand_label);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start discovery from {} listing pages",
        config.crawler.start_urls.len()
    );
}

/// Handles the --discover-only mode: prints the sorted product URLs
async fn handle_discover(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = Coordinator::new(config)?;
    let (product_urls, stats) = coordinator.discover().await?;

    for url in &product_urls {
        println!("{}", url);
    }
    println!(
        "\n✓ {} products discovered across {} listing pages ({} failed)",
        product_urls.len(),
        stats.listing_pages_fetched,
        stats.listing_pages_failed
    );

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Start URLs: {}, output: {} ({})",
        config.crawler.start_urls.len(),
        config.output.output_path().display(),
        config.output.format
    );

    match harvest(config).await {
        Ok(summary) => {
            print_statistics(&summary.statistics);
            println!("\n✓ Output written to: {}", summary.output_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
