//! Attribute (ATT) database layer.
//!
//! This module holds the handle-indexed attribute table that backs the
//! simulated GATT server: the `AttributeStore` contract consumed by the
//! bootstrap code, and an in-memory `AttributeDatabase` implementation.

pub mod constants;
pub mod store;


pub use self::constants::*;
pub use self::store::{Attribute, AttributeDatabase, AttributeStore, StoreError, StoreResult};
