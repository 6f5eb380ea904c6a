use crate::models::catalog::{Catalog, CatalogFile};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Load a catalog file (`.toml`, or `.json` as exported by the web app)
pub async fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
    let catalog = if is_json {
        parse_json_catalog(&content)
    } else {
        parse_toml_catalog(&content)
    }
    .with_context(|| format!("failed to parse catalog file: {}", path.display()))?;

    tracing::info!(
        "loaded {} products from {}",
        catalog.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(catalog)
}

/// Parse a TOML catalog with `[[products]]` tables
pub fn parse_toml_catalog(content: &str) -> Result<Catalog> {
    let file: CatalogFile = toml::from_str(content).context("invalid catalog TOML")?;
    Ok(Catalog::try_from(file)?)
}

/// Parse a JSON catalog: either a bare array of products or `{ "products": [...] }`
pub fn parse_json_catalog(content: &str) -> Result<Catalog> {
    let value: serde_json::Value = serde_json::from_str(content).context("invalid catalog JSON")?;
    let file: CatalogFile = if value.is_array() {
        CatalogFile {
            products: serde_json::from_value(value)?,
        }
    } else {
        serde_json::from_value(value)?
    };
    Ok(Catalog::try_from(file)?)
}
