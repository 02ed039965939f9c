//! Wardrobe Core - Shared domain types and catalog logic.
//!
//! This crate provides the types used across all Wardrobe components:
//! - `storefront` - Server-rendered storefront in front of the shop API
//! - `cli` - Command-line client for the same API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session storage. Wire schemas for the remote shop API live here
//! as serde types so both clients validate responses the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and roles
//! - [`catalog`] - Products, filtering, the selection set, and orders
//! - [`checkout`] - Mock payment form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod types;

pub use catalog::{
    CatalogFilter, Category, CreatedOrder, Gender, GenderFilter, NewProduct, Order,
    OrderedProduct, Product, Selection,
};
pub use types::*;
