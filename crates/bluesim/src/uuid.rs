//! Bluetooth UUID handling.
//!
//! Attribute types and service classes in this crate are either 16-bit
//! SIG-style assigned numbers or full 128-bit UUIDs. Internally, 128-bit
//! UUIDs are stored in little-endian byte order; the attribute database and
//! the discovery record both encode UUIDs big-endian on the wire.

use std::fmt;
use std::str::FromStr;

/// UUID for attribute types, service classes, and protocol identifiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Uuid {
    /// 16-bit assigned number
    Uuid16(u16),
    /// Full 128-bit UUID (little-endian bytes)
    Uuid128([u8; 16]),
}

impl Uuid {
    /// Creates a UUID from a 16-bit assigned number.
    pub const fn from_u16(uuid16: u16) -> Self {
        Uuid::Uuid16(uuid16)
    }

    /// Creates a 128-bit UUID from 16 bytes in little-endian order.
    pub const fn from_bytes_le(bytes: [u8; 16]) -> Self {
        Uuid::Uuid128(bytes)
    }

    /// Creates a 128-bit UUID from 16 bytes in big-endian order.
    pub fn from_bytes_be(mut bytes: [u8; 16]) -> Self {
        bytes.reverse();
        Uuid::Uuid128(bytes)
    }

    /// Tries to create a UUID from a little-endian byte slice.
    ///
    /// Accepts slices of length 2 (16-bit) or 16 (128-bit); returns `None`
    /// for any other length.
    pub fn try_from_slice_le(slice: &[u8]) -> Option<Self> {
        match slice.len() {
            2 => Some(Uuid::Uuid16(u16::from_le_bytes([slice[0], slice[1]]))),
            16 => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(slice);
                Some(Uuid::Uuid128(bytes))
            }
            _ => None,
        }
    }

    /// Returns the 16-bit assigned number if this is a 16-bit UUID.
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Uuid::Uuid16(uuid16) => Some(*uuid16),
            Uuid::Uuid128(_) => None,
        }
    }

    /// Encodes the UUID in big-endian (network) byte order.
    ///
    /// This is the order used inside service/characteristic declaration
    /// values and SDP data elements. 2 bytes for 16-bit, 16 for 128-bit.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            Uuid::Uuid16(uuid16) => uuid16.to_be_bytes().to_vec(),
            Uuid::Uuid128(bytes) => {
                let mut be = *bytes;
                be.reverse();
                be.to_vec()
            }
        }
    }

    /// Encodes the UUID in little-endian byte order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Uuid::Uuid16(uuid16) => uuid16.to_le_bytes().to_vec(),
            Uuid::Uuid128(bytes) => bytes.to_vec(),
        }
    }
}

impl From<u16> for Uuid {
    fn from(uuid16: u16) -> Self {
        Uuid::from_u16(uuid16)
    }
}

impl PartialEq<u16> for Uuid {
    fn eq(&self, other: &u16) -> bool {
        self.as_u16() == Some(*other)
    }
}

impl PartialEq<Uuid> for u16 {
    fn eq(&self, other: &Uuid) -> bool {
        other.as_u16() == Some(*self)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uuid::Uuid16(uuid16) => write!(f, "{:04x}", uuid16),
            Uuid::Uuid128(b) => {
                write!(
                    f,
                    "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
                    b[15], b[14], b[13], b[12],
                    b[11], b[10],
                    b[9], b[8],
                    b[7], b[6],
                    b[5], b[4], b[3], b[2], b[1], b[0]
                )
            }
        }
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uuid::Uuid16(uuid16) => write!(f, "Uuid(0x{:04X})", uuid16),
            Uuid::Uuid128(_) => write!(f, "Uuid({})", self),
        }
    }
}

/// Errors from parsing a UUID string.
#[derive(Debug, PartialEq, Eq)]
pub enum UuidParseError {
    InvalidLength,
    InvalidFormat,
}

impl From<hex::FromHexError> for UuidParseError {
    fn from(_: hex::FromHexError) -> Self {
        UuidParseError::InvalidFormat
    }
}

impl FromStr for Uuid {
    type Err = UuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|c| c.is_ascii_hexdigit()).collect();

        match cleaned.len() {
            4 => {
                // 16-bit short form, e.g. "180A"
                let val = u16::from_str_radix(&cleaned, 16)
                    .map_err(|_| UuidParseError::InvalidFormat)?;
                Ok(Uuid::from_u16(val))
            }
            32 => {
                // Full 128-bit form, hyphens already stripped
                let mut bytes_be = [0u8; 16];
                hex::decode_to_slice(&cleaned, &mut bytes_be)?;
                Ok(Uuid::from_bytes_be(bytes_be))
            }
            _ => Err(UuidParseError::InvalidLength),
        }
    }
}
