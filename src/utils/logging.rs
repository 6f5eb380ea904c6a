/// Logging helpers
///
/// Subscriber setup plus the banner/summary lines the terminal app prints
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::services::SessionSummary;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with verbose logging.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Startup banner
///
/// # Arguments
/// - `config`: active configuration
/// - `catalog_size`: number of products loaded
pub fn log_startup(config: &Config, catalog_size: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 skincare quiz - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📦 catalog: {} ({} products)", config.catalog_path, catalog_size);
    info!("📈 analytics: {:?}", config.analytics);
    info!("{}", "=".repeat(60));
}

/// Final summary for a finished session
pub fn log_session_summary(summary: &SessionSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 quiz finished");
    info!("age: {}", summary.age);
    info!(
        "products: {}",
        truncate_text(&summary.product_names.join(", "), 80)
    );
    info!("{}", "=".repeat(60));
    info!("✅ approved: {}", summary.counts.approved);
    info!("❌ not approved: {}", summary.counts.not_approved);
    info!("⚠️ limited: {}", summary.counts.limited);
    info!("{}", "=".repeat(60));
}

/// Truncate long text for log display
///
/// # Arguments
/// - `text`: original text
/// - `max_len`: maximum number of characters
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
