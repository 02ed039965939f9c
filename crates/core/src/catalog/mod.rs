//! Catalog domain: products as the shop API describes them, plus the
//! client-side logic built on top of an already-fetched catalog.
//!
//! - [`filter`] - name search and gender selector
//! - [`selection`] - the visitor's in-progress cart
//! - [`order`] - order request and response schemas
//! - [`new_product`] - admin product form validation

pub mod filter;
pub mod new_product;
pub mod order;
pub mod selection;

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Price, ProductId};

pub use filter::{CatalogFilter, GenderFilter};
pub use new_product::{FieldError, NewProduct, NewProductForm};
pub use order::{CreatedOrder, Order, OrderRequest, OrderedProduct};
pub use selection::Selection;

/// A product as returned by `GET /products`.
///
/// Products are owned by the shop API; the client never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// The product price in the shop currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Whether the product belongs to `category`.
    #[must_use]
    pub fn is_in(&self, category: Category) -> bool {
        self.category == Some(category)
    }
}

/// Find a product by id in a fetched catalog.
#[must_use]
pub fn find_product<'a>(catalog: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    catalog.iter().find(|p| &p.id == id)
}

/// Products of one category, in catalog order.
#[must_use]
pub fn in_category(catalog: &[Product], category: Category) -> Vec<Product> {
    catalog
        .iter()
        .filter(|p| p.is_in(category))
        .cloned()
        .collect()
}

/// Target audience of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// All genders, in menu order.
    pub const ALL: [Self; 2] = [Self::Men, Self::Women];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }

    /// Parse a form value (`men` / `women`, case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "men" => Some(Self::Men),
            "women" => Some(Self::Women),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product category.
///
/// The API stores categories as free strings (`"T-Shirt"`, `"Pant"`, ...).
/// Known labels are matched case-insensitively; anything else becomes
/// [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    TShirt,
    Shirt,
    Pant,
    Shoes,
    Other,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Self; 5] = [
        Self::TShirt,
        Self::Shirt,
        Self::Pant,
        Self::Shoes,
        Self::Other,
    ];

    /// Label used by the API and in forms.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TShirt => "T-Shirt",
            Self::Shirt => "Shirt",
            Self::Pant => "Pant",
            Self::Shoes => "Shoes",
            Self::Other => "Other",
        }
    }

    /// URL path segment (`/products/t-shirt`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TShirt => "t-shirt",
            Self::Shirt => "shirt",
            Self::Pant => "pant",
            Self::Shoes => "shoes",
            Self::Other => "other",
        }
    }

    /// Plural heading for listing pages.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::TShirt => "T-Shirts",
            Self::Shirt => "Shirts",
            Self::Pant => "Pants",
            Self::Shoes => "Shoes",
            Self::Other => "Other",
        }
    }

    /// Match a URL slug exactly.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Parse an API or form label; unknown labels map to `Other`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;

    use super::{Category, Gender, Product};
    use crate::types::ProductId;

    pub fn product(id: &str, name: &str, gender: Option<Gender>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: Decimal::new(1999, 2),
            category: Some(Category::TShirt),
            gender,
            sizes: Vec::new(),
            colors: Vec::new(),
            stock: 5,
            image: None,
        }
    }
}
