//! Service record registry.
//!
//! Owns every registered record and hands back a process-wide unique
//! `RecordHandle` used for exactly-once deregistration. A real deployment
//! would publish the registered records to remote peers over the discovery
//! protocol; that server side is outside this crate.

use super::types::ServiceRecord;
use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Registration handle returned by the registry. Never zero for a
/// successful registration.
pub type RecordHandle = u32;

/// Errors reported by a service registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("record has no service class list")]
    MissingServiceClasses,

    #[error("registry capacity exceeded ({0} records)")]
    CapacityExceeded(usize),
}

/// Contract between the peripheral and the record registry.
pub trait ServiceRegistry {
    /// Register a record, returning its handle.
    fn register(&mut self, record: ServiceRecord) -> Result<RecordHandle, RegistryError>;

    /// Remove a previously registered record. Must not be called with an
    /// invalid or zero handle; an unknown handle is logged and ignored.
    fn deregister(&mut self, handle: RecordHandle);
}

/// In-memory registry of service records.
pub struct SdpRegistry {
    records: HashMap<RecordHandle, ServiceRecord>,
    next_handle: RecordHandle,
    capacity: usize,
}

impl SdpRegistry {
    /// Record handles start at this value
    const FIRST_HANDLE: RecordHandle = 0x10000;

    pub fn new() -> Self {
        Self::with_capacity(usize::MAX)
    }

    /// Create a registry that rejects registrations beyond `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::new(),
            next_handle: Self::FIRST_HANDLE,
            capacity,
        }
    }

    /// Look up a registered record.
    pub fn record(&self, handle: RecordHandle) -> Option<&ServiceRecord> {
        self.records.get(&handle)
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SdpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry for SdpRegistry {
    fn register(&mut self, record: ServiceRecord) -> Result<RecordHandle, RegistryError> {
        if record.service_classes().is_empty() {
            return Err(RegistryError::MissingServiceClasses);
        }
        if self.records.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded(self.capacity));
        }

        let handle = self.next_handle;
        self.next_handle += 1;
        self.records.insert(handle, record);
        debug!("registered service record, handle 0x{:08x}", handle);
        Ok(handle)
    }

    fn deregister(&mut self, handle: RecordHandle) {
        if self.records.remove(&handle).is_none() {
            warn!("deregister for unknown record handle 0x{:08x}", handle);
        } else {
            debug!("deregistered service record 0x{:08x}", handle);
        }
    }
}
