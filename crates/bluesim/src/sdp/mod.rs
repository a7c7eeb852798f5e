//! Service discovery (SDP) layer.
//!
//! Record construction, binary data element encoding, and the registry that
//! owns registered records.

pub mod encode;
pub mod registry;
pub mod types;


pub use registry::{RecordHandle, RegistryError, SdpRegistry, ServiceRegistry};
pub use types::{
    AttributeId, DataElement, ProfileDescriptor, ProtocolDescriptor, ServiceRecord,
    PRIMARY_LANGUAGE_BASE, PROVIDER_NAME_OFFSET, SERVICE_DESCRIPTION_OFFSET, SERVICE_NAME_OFFSET,
};
