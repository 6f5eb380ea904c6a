pub mod catalog;
pub mod category;
pub mod loaders;
pub mod product;

pub use catalog::{Catalog, CatalogFile};
pub use category::{Category, ProductType};
pub use loaders::{load_catalog, parse_json_catalog, parse_toml_catalog};
pub use product::{Product, ProductStatus};
