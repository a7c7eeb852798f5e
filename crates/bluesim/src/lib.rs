//! bluesim - a simulated Bluetooth LE peripheral's exposed data model
//!
//! This library bootstraps the data a simulated peripheral exposes: a
//! handle-indexed GATT attribute database built from typed service and
//! characteristic declarations, and the binary SDP record that tells peers
//! how to reach the attribute server's endpoint. A small periodic mutator
//! rewrites one attribute value on a fixed interval to simulate sensor
//! drift.
//!
//! The transport serving reads/writes, the SDP request server, and the
//! event loop driving timers are external collaborators, consumed through
//! the `AttributeStore`, `ServiceRegistry`, and `Scheduler` traits.

pub mod att;
pub mod error;
pub mod gatt;
pub mod peripheral;
pub mod sdp;
pub mod timer;
pub mod uuid;

// Re-export common types for convenience
pub use att::{Attribute, AttributeDatabase, AttributeStore, StoreError};
pub use error::SetupError;
pub use gatt::{
    CharacteristicDeclaration, CharacteristicProperties, IncludeDeclaration, PresentationFormat,
    ServiceDeclaration, UserDescription,
};
pub use peripheral::{build_record, populate, HandleRange, HumidityMutator, Peripheral};
pub use sdp::{
    DataElement, RecordHandle, RegistryError, SdpRegistry, ServiceRecord, ServiceRegistry,
};
pub use timer::{PeriodicCallback, Scheduler, TickAction, TimerHandle};
pub use uuid::Uuid;
