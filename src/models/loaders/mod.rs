pub mod catalog_loader;

pub use catalog_loader::{load_catalog, parse_json_catalog, parse_toml_catalog};
