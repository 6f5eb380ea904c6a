//! Result classifier - service layer
//!
//! Partitions selected products into the three verdict groups. The
//! partition is stable: each group keeps the input order.

use serde::Serialize;

use crate::error::{QuizError, QuizResult};
use crate::models::{Product, ProductStatus};

/// Per-verdict counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictCounts {
    pub approved: usize,
    pub not_approved: usize,
    pub limited: usize,
}

impl VerdictCounts {
    pub fn total(&self) -> usize {
        self.approved + self.not_approved + self.limited
    }
}

/// What the end-of-quiz links and events report about a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub age: u8,
    /// Selected product names, catalog order
    pub product_names: Vec<String>,
    pub counts: VerdictCounts,
}

/// Selected products grouped by verdict
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictGroups<'a> {
    pub approved: Vec<&'a Product>,
    pub not_approved: Vec<&'a Product>,
    pub limited: Vec<&'a Product>,
}

impl<'a> VerdictGroups<'a> {
    pub fn counts(&self) -> VerdictCounts {
        VerdictCounts {
            approved: self.approved.len(),
            not_approved: self.not_approved.len(),
            limited: self.limited.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }

    /// Groups in display order: not approved, limited, approved
    ///
    /// Empty groups are included; the presenter decides whether to show them.
    pub fn by_severity(&self) -> [(ProductStatus, &[&'a Product]); 3] {
        [
            (ProductStatus::NotApproved, self.not_approved.as_slice()),
            (ProductStatus::Limited, self.limited.as_slice()),
            (ProductStatus::Approved, self.approved.as_slice()),
        ]
    }

    /// Ids of one group, comma-joined (analytics payload format)
    pub fn joined_ids(group: &[&Product]) -> String {
        group
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Partition products by status
///
/// # Errors
/// `QuizError::DataIntegrity` for the first product whose status is not one
/// of the three verdicts. No partial grouping is returned.
pub fn classify<'a, I>(selected: I) -> QuizResult<VerdictGroups<'a>>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut groups = VerdictGroups::default();
    for product in selected {
        match &product.status {
            ProductStatus::Approved => groups.approved.push(product),
            ProductStatus::NotApproved => groups.not_approved.push(product),
            ProductStatus::Limited => groups.limited.push(product),
            ProductStatus::Unrecognized(raw) => {
                return Err(QuizError::data_integrity(&product.id, raw));
            }
        }
    }
    Ok(groups)
}

/// Section heading shown above a verdict group
pub fn group_heading(status: &ProductStatus) -> &str {
    match status {
        ProductStatus::NotApproved => "לא מתאימים לעור צעיר",
        ProductStatus::Limited => "שימוש מוגבל",
        ProductStatus::Approved => "מתאימים לעור צעיר",
        ProductStatus::Unrecognized(raw) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductType;

    fn product(id: &str, status: ProductStatus) -> Product {
        Product::new(id, id.to_uppercase(), ProductType::Serum, status)
    }

    #[test]
    fn test_one_of_each() {
        let products = vec![
            product("p1", ProductStatus::Approved),
            product("p2", ProductStatus::NotApproved),
            product("p3", ProductStatus::Limited),
        ];

        let groups = classify(&products).unwrap();
        assert_eq!(groups.approved, vec![&products[0]]);
        assert_eq!(groups.not_approved, vec![&products[1]]);
        assert_eq!(groups.limited, vec![&products[2]]);
        assert_eq!(
            groups.counts(),
            VerdictCounts {
                approved: 1,
                not_approved: 1,
                limited: 1
            }
        );
    }

    #[test]
    fn test_empty_input_yields_empty_groups() {
        let groups = classify(std::iter::empty()).unwrap();
        assert!(groups.is_empty());
        assert_eq!(groups.counts(), VerdictCounts::default());
    }

    #[test]
    fn test_partition_is_stable_and_complete() {
        let statuses = [
            ProductStatus::Limited,
            ProductStatus::Approved,
            ProductStatus::Limited,
            ProductStatus::NotApproved,
            ProductStatus::Approved,
            ProductStatus::Limited,
        ];
        let products: Vec<Product> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| product(&format!("p{}", i), s.clone()))
            .collect();

        let groups = classify(&products).unwrap();
        let ids = |g: &[&Product]| g.iter().map(|p| p.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(&groups.limited), vec!["p0", "p2", "p5"]);
        assert_eq!(ids(&groups.approved), vec!["p1", "p4"]);
        assert_eq!(ids(&groups.not_approved), vec!["p3"]);
        assert_eq!(groups.counts().total(), products.len());
    }

    #[test]
    fn test_unrecognized_status_is_a_data_integrity_error() {
        let products = vec![
            product("ok", ProductStatus::Approved),
            product("bad", ProductStatus::Unrecognized("pending".into())),
        ];

        let err = classify(&products).unwrap_err();
        assert_eq!(
            err,
            QuizError::DataIntegrity {
                product_id: "bad".into(),
                status: "pending".into()
            }
        );
    }

    #[test]
    fn test_by_severity_order() {
        let products = vec![
            product("a", ProductStatus::Approved),
            product("n", ProductStatus::NotApproved),
        ];
        let groups = classify(&products).unwrap();
        let order: Vec<ProductStatus> = groups.by_severity().iter().map(|(s, _)| s.clone()).collect();
        assert_eq!(
            order,
            vec![
                ProductStatus::NotApproved,
                ProductStatus::Limited,
                ProductStatus::Approved
            ]
        );
        assert!(groups.by_severity()[1].1.is_empty());
        assert_eq!(VerdictGroups::joined_ids(groups.by_severity()[0].1), "n");
    }
}
