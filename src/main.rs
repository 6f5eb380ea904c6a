use std::path::Path;

use anyhow::Result;
use skin_quiz::utils::logging;
use skin_quiz::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // optional quiz.toml path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_toml_file(Path::new(&path))?,
        None => Config::from_env(),
    };

    logging::init(config.verbose_logging);

    App::initialize(config).await?.run().await?;

    Ok(())
}
