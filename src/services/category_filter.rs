//! Category filter - service layer
//!
//! Read-only catalog view for the active filter-bar category.

use crate::models::{Catalog, Category, Product};

/// Products visible under `active`, in catalog order
pub fn filter<'a>(catalog: &'a Catalog, active: &Category) -> Vec<&'a Product> {
    catalog
        .products()
        .iter()
        .filter(|p| active.matches(&p.product_type))
        .collect()
}
