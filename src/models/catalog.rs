//! Product catalog
//!
//! The immutable product list for a session. Shared read-only between
//! sessions behind an `Arc`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::models::product::Product;

/// On-disk catalog layout (`[[products]]` tables)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Immutable, id-indexed product list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if product.id.trim().is_empty() {
                return Err(CatalogError::EmptyId {
                    name: product.name.clone(),
                });
            }
            if index.insert(product.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolve selected ids to products, in catalog order
    ///
    /// Ids with no catalog entry are dropped.
    pub fn resolve<I, S>(&self, ids: I) -> Vec<&Product>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wanted = HashSet::new();
        for id in ids {
            let id = id.as_ref();
            match self.index.get(id) {
                Some(&i) => {
                    wanted.insert(i);
                }
                None => debug!("dropping unknown product id '{}'", id),
            }
        }

        self.products
            .iter()
            .enumerate()
            .filter(|(i, _)| wanted.contains(i))
            .map(|(_, p)| p)
            .collect()
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Catalog::new(file.products)
    }
}
