use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Label (Hebrew display label or English slug) → product type
static TYPE_LABELS: phf::Map<&'static str, ProductType> = phf_map! {
    "סבון" => ProductType::Soap,
    "soap" => ProductType::Soap,
    "קרם לחות" => ProductType::Moisturizer,
    "moisturizer" => ProductType::Moisturizer,
    "סרום" => ProductType::Serum,
    "serum" => ProductType::Serum,
    "טונר" => ProductType::Toner,
    "toner" => ProductType::Toner,
    "מסיכה" => ProductType::Mask,
    "mask" => ProductType::Mask,
    "טיפול נקודתי" => ProductType::SpotTreatment,
    "spot-treatment" => ProductType::SpotTreatment,
};

/// Label of the "all" filter pseudo-category
pub const ALL_LABEL: &str = "הכל";

/// Product category tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    /// סבון
    Soap,
    /// קרם לחות
    Moisturizer,
    /// סרום
    Serum,
    /// טונר
    Toner,
    /// מסיכה
    Mask,
    /// טיפול נקודתי
    SpotTreatment,
    /// Tag the catalog uses that is not in the fixed set
    Other(String),
}

impl ProductType {
    /// English slug
    pub fn slug(&self) -> &str {
        match self {
            ProductType::Soap => "soap",
            ProductType::Moisturizer => "moisturizer",
            ProductType::Serum => "serum",
            ProductType::Toner => "toner",
            ProductType::Mask => "mask",
            ProductType::SpotTreatment => "spot-treatment",
            ProductType::Other(label) => label,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            ProductType::Soap => "סבון",
            ProductType::Moisturizer => "קרם לחות",
            ProductType::Serum => "סרום",
            ProductType::Toner => "טונר",
            ProductType::Mask => "מסיכה",
            ProductType::SpotTreatment => "טיפול נקודתי",
            ProductType::Other(label) => label,
        }
    }

    /// Parse a slug or display label. Unknown labels become `Other`.
    pub fn from_label(s: &str) -> Self {
        let s = s.trim();
        TYPE_LABELS
            .get(s)
            .or_else(|| TYPE_LABELS.get(s.to_lowercase().as_str()))
            .cloned()
            .unwrap_or_else(|| ProductType::Other(s.to_string()))
    }
}

impl From<String> for ProductType {
    fn from(s: String) -> Self {
        ProductType::from_label(&s)
    }
}

impl From<ProductType> for String {
    fn from(t: ProductType) -> Self {
        t.label().to_string()
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Filter value on the products screen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Pseudo-category matching every product
    #[default]
    All,
    Type(ProductType),
}

impl Category {
    /// Filter bar buttons, in display order
    pub fn filter_bar() -> Vec<Category> {
        vec![
            Category::All,
            Category::Type(ProductType::Soap),
            Category::Type(ProductType::Moisturizer),
            Category::Type(ProductType::Serum),
            Category::Type(ProductType::Toner),
            Category::Type(ProductType::Mask),
        ]
    }

    pub fn from_label(s: &str) -> Self {
        let s = s.trim();
        if s == ALL_LABEL || s.eq_ignore_ascii_case("all") {
            Category::All
        } else {
            Category::Type(ProductType::from_label(s))
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::All => ALL_LABEL,
            Category::Type(t) => t.label(),
        }
    }

    pub fn matches(&self, product_type: &ProductType) -> bool {
        match self {
            Category::All => true,
            Category::Type(t) => t == product_type,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
