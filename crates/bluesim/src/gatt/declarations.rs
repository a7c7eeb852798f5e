//! Declaration value encoders for the GATT attribute table.
//!
//! Each declaration kind knows its own attribute type UUID and the byte
//! layout of its value, as served from the attribute database:
//!
//! - service declaration: service UUID, big-endian;
//! - characteristic declaration: properties byte, value handle (LE),
//!   characteristic UUID (BE);
//! - include declaration: start/end handle (LE), optional service UUID (BE);
//! - presentation format: format, exponent, unit (BE), namespace,
//!   description (BE);
//! - user description: raw UTF-8 text.

use super::types::CharacteristicProperties;
use crate::att::{
    ATT_MAX_VALUE_LEN, CHARACTERISTIC_UUID, CHAR_FORMAT_UUID, CHAR_USER_DESC_UUID, INCLUDE_UUID,
    PRIMARY_SERVICE_UUID, SECONDARY_SERVICE_UUID,
};
use crate::uuid::Uuid;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// A primary or secondary service declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDeclaration {
    pub uuid: Uuid,
    pub primary: bool,
}

impl ServiceDeclaration {
    pub fn primary(uuid: Uuid) -> Self {
        Self { uuid, primary: true }
    }

    pub fn secondary(uuid: Uuid) -> Self {
        Self {
            uuid,
            primary: false,
        }
    }

    /// Attribute type under which this declaration is stored.
    pub fn attribute_type(&self) -> Uuid {
        if self.primary {
            Uuid::from_u16(PRIMARY_SERVICE_UUID)
        } else {
            Uuid::from_u16(SECONDARY_SERVICE_UUID)
        }
    }

    /// Value bytes: the service's own UUID in big-endian order.
    pub fn encode(&self) -> Vec<u8> {
        self.uuid.to_be_bytes()
    }
}

/// A characteristic declaration, pointing at its value attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicDeclaration {
    pub properties: CharacteristicProperties,
    /// Handle of the characteristic's value attribute. Must lie strictly
    /// after the declaration's own handle.
    pub value_handle: u16,
    pub uuid: Uuid,
}

impl CharacteristicDeclaration {
    pub fn attribute_type(&self) -> Uuid {
        Uuid::from_u16(CHARACTERISTIC_UUID)
    }

    /// Value bytes: properties, value handle (LE), characteristic UUID (BE).
    pub fn encode(&self) -> Vec<u8> {
        let mut value = Vec::with_capacity(3 + self.uuid.to_be_bytes().len());
        value.push(self.properties.bits());
        value.write_u16::<LittleEndian>(self.value_handle).unwrap();
        value.extend_from_slice(&self.uuid.to_be_bytes());
        value
    }
}

/// An include declaration referencing another service by handle range.
///
/// The included service UUID is only present for 16-bit service UUIDs; an
/// include of a 128-bit service carries the handle range alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeDeclaration {
    pub start_handle: u16,
    pub end_handle: u16,
    pub service_uuid: Option<Uuid>,
}

impl IncludeDeclaration {
    pub fn attribute_type(&self) -> Uuid {
        Uuid::from_u16(INCLUDE_UUID)
    }

    /// Value bytes: start handle (LE), end handle (LE), UUID (BE) if present.
    pub fn encode(&self) -> Vec<u8> {
        assert!(
            self.start_handle <= self.end_handle,
            "include range must not be inverted"
        );
        let mut value = Vec::with_capacity(6);
        value.write_u16::<LittleEndian>(self.start_handle).unwrap();
        value.write_u16::<LittleEndian>(self.end_handle).unwrap();
        if let Some(uuid) = self.service_uuid {
            value.extend_from_slice(&uuid.to_be_bytes());
        }
        value
    }
}

/// Namespace field of a presentation format descriptor.
///
/// Normally a single namespace byte, but some vendor tables store a full
/// 16-bit organization UUID in its place, giving the 8-byte descriptor
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatNamespace {
    Byte(u8),
    Uuid16(u16),
}

/// A characteristic presentation format descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationFormat {
    pub format: u8,
    pub exponent: i8,
    /// Unit UUID, 16-bit assigned number
    pub unit: u16,
    pub namespace: FormatNamespace,
    /// Description UUID, 16-bit assigned number
    pub description: u16,
}

impl PresentationFormat {
    pub fn attribute_type(&self) -> Uuid {
        Uuid::from_u16(CHAR_FORMAT_UUID)
    }

    /// Value bytes: format, exponent, unit (BE), namespace, description (BE).
    /// 7 bytes with a namespace byte, 8 with a namespace UUID.
    pub fn encode(&self) -> Vec<u8> {
        let mut value = Vec::with_capacity(8);
        value.push(self.format);
        value.push(self.exponent as u8);
        value.write_u16::<BigEndian>(self.unit).unwrap();
        match self.namespace {
            FormatNamespace::Byte(ns) => value.push(ns),
            FormatNamespace::Uuid16(ns) => value.write_u16::<BigEndian>(ns).unwrap(),
        }
        value.write_u16::<BigEndian>(self.description).unwrap();
        debug_assert!(value.len() == 7 || value.len() == 8);
        value
    }
}

/// A characteristic user description descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserDescription<'a>(pub &'a str);

impl UserDescription<'_> {
    pub fn attribute_type(&self) -> Uuid {
        Uuid::from_u16(CHAR_USER_DESC_UUID)
    }

    /// Value bytes: raw UTF-8, unpadded, no terminator.
    pub fn encode(&self) -> Vec<u8> {
        assert!(
            self.0.len() <= ATT_MAX_VALUE_LEN,
            "user description exceeds maximum attribute value length"
        );
        self.0.as_bytes().to_vec()
    }
}
