use serde::{Deserialize, Serialize};

use crate::models::category::ProductType;

/// Marker the catalog uses for "no value"
const EMPTY_MARKER: &str = "-";

/// Suitability verdict attached to a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    Approved,
    NotApproved,
    Limited,
    /// Anything else found in the catalog data. The classifier refuses it.
    Unrecognized(String),
}

impl ProductStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProductStatus::Approved => "approved",
            ProductStatus::NotApproved => "not_approved",
            ProductStatus::Limited => "limited",
            ProductStatus::Unrecognized(raw) => raw,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            ProductStatus::Approved => "מתאים",
            ProductStatus::NotApproved => "לא מתאים",
            ProductStatus::Limited => "שימוש מוגבל",
            ProductStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for ProductStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "approved" => ProductStatus::Approved,
            "not_approved" => ProductStatus::NotApproved,
            "limited" => ProductStatus::Limited,
            _ => ProductStatus::Unrecognized(s),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(s: ProductStatus) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog product with its precomputed verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default)]
    pub rinse_or_leave: String,
    #[serde(default)]
    pub problematic_ingredients: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub usage_note: String,
    pub status: ProductStatus,
    #[serde(default)]
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        product_type: ProductType,
        status: ProductStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product_type,
            rinse_or_leave: String::new(),
            problematic_ingredients: String::new(),
            reason: String::new(),
            usage_note: String::new(),
            status,
            status_text: String::new(),
            image: None,
        }
    }

    pub fn rinse_or_leave(&self) -> Option<&str> {
        present(&self.rinse_or_leave)
    }

    pub fn problematic_ingredients(&self) -> Option<&str> {
        present(&self.problematic_ingredients)
    }

    pub fn reason(&self) -> Option<&str> {
        present(&self.reason)
    }

    pub fn usage_note(&self) -> Option<&str> {
        present(&self.usage_note)
    }

    pub fn status_text(&self) -> Option<&str> {
        present(&self.status_text)
    }
}

fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == EMPTY_MARKER {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!(ProductStatus::from("approved".to_string()), ProductStatus::Approved);
        assert_eq!(
            ProductStatus::from("not_approved".to_string()),
            ProductStatus::NotApproved
        );
        assert_eq!(ProductStatus::from("limited".to_string()), ProductStatus::Limited);
    }

    #[test]
    fn test_status_keeps_unrecognized_value() {
        let status = ProductStatus::from("Approved".to_string());
        assert_eq!(status, ProductStatus::Unrecognized("Approved".to_string()));
        assert_eq!(status.as_str(), "Approved");
    }

    #[test]
    fn test_optional_fields_treat_dash_as_absent() {
        let mut product = Product::new("p1", "ג'ל ניקוי", ProductType::Soap, ProductStatus::Approved);
        product.problematic_ingredients = "-".to_string();
        product.reason = "  ".to_string();
        product.usage_note = "פעם ביום".to_string();

        assert_eq!(product.problematic_ingredients(), None);
        assert_eq!(product.reason(), None);
        assert_eq!(product.rinse_or_leave(), None);
        assert_eq!(product.usage_note(), Some("פעם ביום"));
    }

    #[test]
    fn test_product_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "p7",
            "name": "סרום ויטמין C",
            "type": "סרום",
            "rinseOrLeave": "leave",
            "problematicIngredients": "ויטמין C בריכוז גבוה",
            "reason": "מרכיבים פעילים",
            "usageNote": "-",
            "status": "limited",
            "statusText": "שימוש מוגבל"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_type, ProductType::Serum);
        assert_eq!(product.status, ProductStatus::Limited);
        assert_eq!(product.rinse_or_leave(), Some("leave"));
        assert_eq!(product.usage_note(), None);
        assert_eq!(product.image, None);
    }
}
