//! Admin "add product" form: raw input, validation, and the validated value
//! that is forwarded to `POST /products`.

use core::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::{Category, Gender};

/// Image extensions the shop API accepts for uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Raw text fields as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub sizes: String,
    #[serde(default)]
    pub colors: String,
}

/// A single validation failure, shown next to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A validated product ready to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: Category,
    pub gender: Gender,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl NewProduct {
    /// Validate the raw form.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once so the form can show them together.
    pub fn from_form(form: &NewProductForm) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = form.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        let description = form.description.trim();
        if description.is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        }

        let price = match form.price.trim() {
            "" => {
                errors.push(FieldError::new("price", "Price is required"));
                None
            }
            raw => match raw.parse::<Decimal>() {
                Ok(p) if p.is_sign_negative() => {
                    errors.push(FieldError::new("price", "Price cannot be negative"));
                    None
                }
                Ok(p) => Some(p),
                Err(_) => {
                    errors.push(FieldError::new("price", "Price must be a number"));
                    None
                }
            },
        };

        let stock = match form.stock.trim() {
            "" => {
                errors.push(FieldError::new("stock", "Stock is required"));
                None
            }
            raw => raw.parse::<u32>().map_or_else(
                |_| {
                    errors.push(FieldError::new(
                        "stock",
                        "Stock must be a whole number of zero or more",
                    ));
                    None
                },
                Some,
            ),
        };

        let gender = Gender::parse(&form.gender);
        if gender.is_none() {
            errors.push(FieldError::new("gender", "Choose men or women"));
        }

        match (price, stock, gender) {
            (Some(price), Some(stock), Some(gender)) if errors.is_empty() => Ok(Self {
                name: name.to_owned(),
                description: description.to_owned(),
                price,
                stock,
                category: if form.category.trim().is_empty() {
                    Category::TShirt
                } else {
                    Category::from_label(&form.category)
                },
                gender,
                sizes: split_list(&form.sizes),
                colors: split_list(&form.colors),
            }),
            _ => Err(errors),
        }
    }

    /// Text fields in the multipart layout the API expects.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("stock", self.stock.to_string()),
            ("category", self.category.label().to_owned()),
            ("gender", self.gender.as_str().to_owned()),
            ("sizes", self.sizes.join(",")),
            ("colors", self.colors.join(",")),
        ]
    }
}

/// Split a comma-separated list, dropping blanks.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whether an upload file name has an accepted image extension.
#[must_use]
pub fn is_allowed_image(file_name: &str) -> bool {
    file_name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}
