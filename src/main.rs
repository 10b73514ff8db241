use clap::Parser;
use game_deals::config::{load_config, AppConfig};
use game_deals::presenter::{render_detail, render_list};
use game_deals::source::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use game_deals::{Catalog, SortKey};
use std::path::PathBuf;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "game-deals")]
#[command(about = "Browse a game price catalog: best offers, regular prices and discounts")]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Read the catalog from a local JSON file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Fetch the catalog from this URL
    #[arg(long)]
    url: Option<String>,

    /// Only show games whose title contains this text
    #[arg(long)]
    search: Option<String>,

    /// name, priceAsc, priceDesc, ratingDesc or discountDesc
    #[arg(long)]
    sort: Option<SortKey>,

    /// Show the full entry for this title
    #[arg(long)]
    detail: Option<String>,

    /// Keep reloading the catalog on the configured interval
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config: AppConfig = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(url) = &cli.url {
        config.catalog_url = url.clone();
        config.catalog_file = None;
    }
    if let Some(file) = &cli.file {
        config.catalog_file = Some(file.clone());
    }

    let source: Box<dyn CatalogSource> = match &config.catalog_file {
        Some(path) => Box::new(FileCatalogSource::new(path)),
        None => match HttpCatalogSource::new(
            &config.catalog_url,
            config.request_timeout_seconds,
            &config.user_agent,
        ) {
            Ok(s) => Box::new(s),
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                std::process::exit(2);
            }
        },
    };

    let mut catalog = Catalog::new();
    {
        let view = catalog.view_mut();
        view.set_search_term(cli.search.as_deref().unwrap_or(&config.default_search));
        view.set_sort_key(cli.sort.unwrap_or(config.default_sort));
    }

    if let Err(e) = catalog.load(source.as_ref()).await {
        error!("Could not load the catalog: {}", e);
        std::process::exit(1);
    }
    print_catalog(&catalog, cli.detail.as_deref());

    if !cli.watch {
        return;
    }

    loop {
        info!(
            "Waiting {}s before the next reload (Ctrl-C to stop)...",
            config.refresh_interval_seconds
        );
        tokio::select! {
            _ = sleep(Duration::from_secs(config.refresh_interval_seconds)) => {
                info!("Timer triggered.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping.");
                return;
            }
        }

        match catalog.load(source.as_ref()).await {
            Ok(_) => print_catalog(&catalog, cli.detail.as_deref()),
            Err(e) => warn!("Reload failed, keeping the previous catalog: {}", e),
        }
    }
}

fn print_catalog(catalog: &Catalog, detail: Option<&str>) {
    let view = catalog.view();
    match detail {
        Some(title) => match view.get_by_id(title) {
            Some(game) => println!("{}", render_detail(game)),
            None => warn!("No game titled '{}'", title),
        },
        None => println!("{}", render_list(view)),
    }
}
