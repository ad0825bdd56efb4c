use std::io;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use xp_store::catalog::{BundledCatalog, Catalog, CatalogSource, FileCatalog};
use xp_store::cli::Cli;
use xp_store::components::debug_log::{DebugLogHandle, set_global_debug_log};
use xp_store::config::StoreConfig;
use xp_store::drivers::OutputDriver;
use xp_store::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use xp_store::overlay::SessionHistory;
use xp_store::prefs::PreferenceStore;
use xp_store::runner::run_storefront;
use xp_store::storefront::Storefront;
use xp_store::tracing_sub;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let mut config = StoreConfig::discover(cli.config.as_deref()).map_err(io::Error::other)?;
    cli.apply(&mut config);

    set_global_debug_log(DebugLogHandle::default());
    tracing_sub::init(cli.log_level());

    let source: Box<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => Box::new(FileCatalog::new(path)),
        None => Box::new(BundledCatalog),
    };
    let (catalog, catalog_error) = Catalog::load_from(source.as_ref());
    info!(source = %source.describe(), products = catalog.products().len(), "starting store");

    let prefs_path = config.prefs_path.clone().or_else(PreferenceStore::default_path);
    let prefs = PreferenceStore::load_or_default(prefs_path);
    let host = if config.history_enabled {
        SessionHistory::new()
    } else {
        SessionHistory::detached()
    };
    info!(history = host.is_available(), policy = ?config.back_policy, "overlay navigation");

    let mut app = Storefront::new(catalog, &config, prefs, host);
    if let Some(err) = &catalog_error {
        app = app.with_catalog_error(err);
    }
    if let Some(product) = &cli.product {
        app.open_product(product);
    }

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let result = run_storefront(
        ConsoleInputDriver::new(),
        &mut output,
        &mut app,
        POLL_INTERVAL,
    );
    output.exit()?;
    result
}
