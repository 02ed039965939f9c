//! Session-backed models for the storefront.
//!
//! Catalog and order types come from `wardrobe_core`; this module only holds
//! what the storefront itself stores per visitor.

pub mod session;

pub use session::{AuthSession, Flash, FlashKind, Preferences, keys as session_keys};
