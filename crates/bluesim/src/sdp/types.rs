//! Service discovery record types.
//!
//! A `ServiceRecord` is a self-contained map of attribute-id to data
//! element, built once at startup and handed to a registry. The record for
//! this peripheral carries the service class, a profile descriptor, the
//! access protocol chain down to the ATT endpoint, and human-readable
//! metadata.

use crate::uuid::Uuid;
use std::collections::BTreeMap;

/// An SDP data element: the tagged value type that record attributes hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataElement {
    Nil,
    Unsigned8(u8),
    Unsigned16(u16),
    Unsigned32(u32),
    Boolean(bool),
    TextString(String),
    Url(String),
    Uuid(Uuid),
    Sequence(Vec<DataElement>),
    Alternative(Vec<DataElement>),
}

/// Universal service record attribute IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum AttributeId {
    ServiceRecordHandle = 0x0000,
    ServiceClassIdList = 0x0001,
    ServiceId = 0x0003,
    ProtocolDescriptorList = 0x0004,
    BrowseGroupList = 0x0005,
    BluetoothProfileDescriptorList = 0x0009,
    DocumentationUrl = 0x000A,
    ClientExecutableUrl = 0x000B,
    IconUrl = 0x000C,
}

impl AttributeId {
    pub const fn id(self) -> u16 {
        self as u16
    }
}

/// Base attribute ID of the primary language string attributes.
pub const PRIMARY_LANGUAGE_BASE: u16 = 0x0100;
/// Offsets from the language base for the string attributes.
pub const SERVICE_NAME_OFFSET: u16 = 0x0000;
pub const SERVICE_DESCRIPTION_OFFSET: u16 = 0x0001;
pub const PROVIDER_NAME_OFFSET: u16 = 0x0002;

/// One layer of an access protocol chain: a protocol UUID plus its
/// parameters (e.g. L2CAP with a PSM, ATT with a handle range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDescriptor {
    pub uuid: Uuid,
    pub params: Vec<DataElement>,
}

/// A profile descriptor: profile UUID plus a 2-byte version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileDescriptor {
    pub uuid: Uuid,
    pub version: u16,
}

/// A service discovery record.
///
/// Attributes are kept in a `BTreeMap` so the binary encoding is
/// deterministic and ascending by attribute ID, as the attribute list wire
/// format requires.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceRecord {
    attributes: BTreeMap<u16, DataElement>,
}

impl ServiceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw record attribute.
    pub fn set_attribute(&mut self, id: u16, value: DataElement) {
        self.attributes.insert(id, value);
    }

    /// Look up a record attribute.
    pub fn attribute(&self, id: u16) -> Option<&DataElement> {
        self.attributes.get(&id)
    }

    /// Number of attributes in the record.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate attributes in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &DataElement)> {
        self.attributes.iter().map(|(&id, value)| (id, value))
    }

    /// Set the browse group list attribute.
    pub fn set_browse_groups(&mut self, groups: Vec<Uuid>) {
        let elements = groups.into_iter().map(DataElement::Uuid).collect();
        self.set_attribute(AttributeId::BrowseGroupList.id(), DataElement::Sequence(elements));
    }

    /// Set the service class ID list attribute.
    pub fn set_service_classes(&mut self, classes: Vec<Uuid>) {
        let elements = classes.into_iter().map(DataElement::Uuid).collect();
        self.set_attribute(
            AttributeId::ServiceClassIdList.id(),
            DataElement::Sequence(elements),
        );
    }

    /// The service class UUIDs declared by this record, if any.
    pub fn service_classes(&self) -> Vec<Uuid> {
        match self.attribute(AttributeId::ServiceClassIdList.id()) {
            Some(DataElement::Sequence(elements)) => elements
                .iter()
                .filter_map(|e| match e {
                    DataElement::Uuid(uuid) => Some(*uuid),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Set the profile descriptor list attribute.
    pub fn set_profile_descriptors(&mut self, profiles: Vec<ProfileDescriptor>) {
        let elements = profiles
            .into_iter()
            .map(|p| {
                DataElement::Sequence(vec![
                    DataElement::Uuid(p.uuid),
                    DataElement::Unsigned16(p.version),
                ])
            })
            .collect();
        self.set_attribute(
            AttributeId::BluetoothProfileDescriptorList.id(),
            DataElement::Sequence(elements),
        );
    }

    /// Set the access protocol chain, outermost layer first.
    pub fn set_access_protocols(&mut self, chain: Vec<ProtocolDescriptor>) {
        let elements = chain
            .into_iter()
            .map(|layer| {
                let mut inner = Vec::with_capacity(1 + layer.params.len());
                inner.push(DataElement::Uuid(layer.uuid));
                inner.extend(layer.params);
                DataElement::Sequence(inner)
            })
            .collect();
        self.set_attribute(
            AttributeId::ProtocolDescriptorList.id(),
            DataElement::Sequence(elements),
        );
    }

    /// Set the service name, provider name, and optional description.
    pub fn set_info(&mut self, name: &str, provider: &str, description: Option<&str>) {
        self.set_attribute(
            PRIMARY_LANGUAGE_BASE + SERVICE_NAME_OFFSET,
            DataElement::TextString(name.to_owned()),
        );
        self.set_attribute(
            PRIMARY_LANGUAGE_BASE + PROVIDER_NAME_OFFSET,
            DataElement::TextString(provider.to_owned()),
        );
        if let Some(description) = description {
            self.set_attribute(
                PRIMARY_LANGUAGE_BASE + SERVICE_DESCRIPTION_OFFSET,
                DataElement::TextString(description.to_owned()),
            );
        }
    }

    /// Set the client-executable, documentation, and icon URL attributes.
    pub fn set_urls(&mut self, client_executable: &str, documentation: &str, icon: &str) {
        self.set_attribute(
            AttributeId::ClientExecutableUrl.id(),
            DataElement::Url(client_executable.to_owned()),
        );
        self.set_attribute(
            AttributeId::DocumentationUrl.id(),
            DataElement::Url(documentation.to_owned()),
        );
        self.set_attribute(AttributeId::IconUrl.id(), DataElement::Url(icon.to_owned()));
    }

    /// Set the service ID attribute.
    pub fn set_service_id(&mut self, uuid: Uuid) {
        self.set_attribute(AttributeId::ServiceId.id(), DataElement::Uuid(uuid));
    }
}
