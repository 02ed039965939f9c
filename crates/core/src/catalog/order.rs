//! Order request and response schemas for `/orders`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Selection;
use crate::types::{OrderId, Price, ProductId};

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub product_ids: Vec<String>,
}

impl From<&Selection> for OrderRequest {
    fn from(selection: &Selection) -> Self {
        Self {
            product_ids: selection.to_product_ids(),
        }
    }
}

/// A product line inside an order.
///
/// Freshly created orders list bare ids; the order history endpoint expands
/// them to `{id, name, price, ...}`. Both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "OrderedProductWire")]
pub struct OrderedProduct {
    pub id: ProductId,
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

impl OrderedProduct {
    /// Name for display, falling back to the id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }

    #[must_use]
    pub fn unit_price(&self) -> Option<Price> {
        self.price.map(Price::usd)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderedProductWire {
    Detailed {
        id: ProductId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        price: Option<Decimal>,
    },
    Bare(ProductId),
}

impl From<OrderedProductWire> for OrderedProduct {
    fn from(wire: OrderedProductWire) -> Self {
        match wire {
            OrderedProductWire::Detailed { id, name, price } => Self { id, name, price },
            OrderedProductWire::Bare(id) => Self {
                id,
                name: None,
                price: None,
            },
        }
    }
}

/// Response of `POST /orders`.
///
/// `warning` is passed through verbatim; the API uses it when some of the
/// submitted ids were ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    #[serde(rename = "_id", default)]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub products: Vec<OrderedProduct>,
    #[serde(default)]
    pub warning: Option<String>,
}

/// One entry of `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub products: Vec<OrderedProduct>,
    #[serde(default)]
    pub warning: Option<String>,
}

impl Order {
    /// Sum of the known line prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.products.iter().filter_map(OrderedProduct::unit_price).sum()
    }
}
