//! Attribute store for the simulated GATT server.
//!
//! The bootstrap code in this crate is write-only against the store: it adds
//! each attribute exactly once and never reads values back. The in-memory
//! `AttributeDatabase` provided here is the reference implementation of the
//! `AttributeStore` contract; a real transport layer would serve reads and
//! writes out of the same table.

use super::constants::{ATT_HANDLE_MIN, ATT_MAX_VALUE_LEN};
use crate::uuid::Uuid;
use std::collections::BTreeMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors reported by an attribute store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate handle: 0x{0:04x}")]
    DuplicateHandle(u16),

    #[error("unknown handle: 0x{0:04x}")]
    UnknownHandle(u16),

    #[error("invalid handle: 0x{0:04x}")]
    InvalidHandle(u16),

    #[error("attribute capacity exceeded ({0} entries)")]
    CapacityExceeded(usize),

    #[error("value too long for handle 0x{handle:04x}: {len} bytes")]
    ValueTooLong { handle: u16, len: usize },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// An attribute in the database: a (handle, type, value) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute handle
    pub handle: u16,
    /// Attribute type (UUID)
    pub type_: Uuid,
    /// Attribute value
    pub value: Vec<u8>,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(handle: u16, type_: Uuid, value: Vec<u8>) -> Self {
        Self {
            handle,
            type_,
            value,
        }
    }
}

/// Contract between the bootstrapper/mutator and the attribute store.
///
/// `add` fails if the handle already exists or capacity is exhausted;
/// `update` fails if the handle does not exist. Both either succeed or fail
/// atomically.
pub trait AttributeStore: Send + Sync {
    /// Add a new attribute under `handle`.
    fn add(&self, handle: u16, type_: Uuid, value: Vec<u8>) -> StoreResult<()>;

    /// Replace the value (and type) of an existing attribute.
    fn update(&self, handle: u16, type_: Uuid, value: Vec<u8>) -> StoreResult<()>;

    /// Look up an attribute by handle.
    fn get(&self, handle: u16) -> StoreResult<Attribute>;
}

/// In-memory attribute database.
///
/// Handles are kept in a `BTreeMap` so iteration is always in ascending
/// handle order. Access is serialized with an `RwLock` so the database can
/// be shared with a transport layer.
pub struct AttributeDatabase {
    attributes: RwLock<BTreeMap<u16, Attribute>>,
    capacity: usize,
}

impl AttributeDatabase {
    /// Create a new empty attribute database with no practical capacity bound.
    pub fn new() -> Self {
        Self::with_capacity(usize::MAX)
    }

    /// Create an empty database that rejects adds beyond `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attributes: RwLock::new(BTreeMap::new()),
            capacity,
        }
    }

    /// Number of attributes currently stored.
    pub fn len(&self) -> usize {
        self.attributes.read().unwrap().len()
    }

    /// Whether the database holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.read().unwrap().is_empty()
    }

    /// Whether an attribute exists under `handle`.
    pub fn has_attribute(&self, handle: u16) -> bool {
        self.attributes.read().unwrap().contains_key(&handle)
    }

    /// The lowest and highest handle currently stored, if any.
    pub fn handle_range(&self) -> Option<(u16, u16)> {
        let attributes = self.attributes.read().unwrap();
        let first = *attributes.keys().next()?;
        let last = *attributes.keys().next_back()?;
        Some((first, last))
    }

    /// Snapshot of all attributes in ascending handle order.
    pub fn dump(&self) -> Vec<Attribute> {
        self.attributes.read().unwrap().values().cloned().collect()
    }

    fn check_value(handle: u16, value: &[u8]) -> StoreResult<()> {
        if value.len() > ATT_MAX_VALUE_LEN {
            return Err(StoreError::ValueTooLong {
                handle,
                len: value.len(),
            });
        }
        Ok(())
    }
}

impl Default for AttributeDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeStore for AttributeDatabase {
    fn add(&self, handle: u16, type_: Uuid, value: Vec<u8>) -> StoreResult<()> {
        if handle < ATT_HANDLE_MIN {
            return Err(StoreError::InvalidHandle(handle));
        }
        Self::check_value(handle, &value)?;

        let mut attributes = self.attributes.write().unwrap();
        if attributes.contains_key(&handle) {
            return Err(StoreError::DuplicateHandle(handle));
        }
        if attributes.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded(self.capacity));
        }

        attributes.insert(handle, Attribute::new(handle, type_, value));
        Ok(())
    }

    fn update(&self, handle: u16, type_: Uuid, value: Vec<u8>) -> StoreResult<()> {
        Self::check_value(handle, &value)?;

        let mut attributes = self.attributes.write().unwrap();
        let attr = attributes
            .get_mut(&handle)
            .ok_or(StoreError::UnknownHandle(handle))?;

        attr.type_ = type_;
        attr.value = value;
        Ok(())
    }

    fn get(&self, handle: u16) -> StoreResult<Attribute> {
        self.attributes
            .read()
            .unwrap()
            .get(&handle)
            .cloned()
            .ok_or(StoreError::UnknownHandle(handle))
    }
}
