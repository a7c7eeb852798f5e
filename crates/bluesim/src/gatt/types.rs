//! Common types for GATT declarations

use bitflags::bitflags;

bitflags! {
    /// Characteristic properties as defined in the Bluetooth specification
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharacteristicProperties: u8 {
        const BROADCAST = 0x01;
        const READ = 0x02;
        const WRITE_WITHOUT_RESPONSE = 0x04;
        const WRITE = 0x08;
        const NOTIFY = 0x10;
        const INDICATE = 0x20;
        const AUTHENTICATED_SIGNED_WRITES = 0x40;
        const EXTENDED_PROPERTIES = 0x80;
    }
}

impl CharacteristicProperties {
    pub fn can_read(&self) -> bool {
        self.contains(CharacteristicProperties::READ)
    }

    pub fn can_write(&self) -> bool {
        self.contains(CharacteristicProperties::WRITE)
    }

    pub fn can_notify(&self) -> bool {
        self.contains(CharacteristicProperties::NOTIFY)
    }
}

// Presentation format codes (Characteristic Presentation Format descriptor)
pub const FORMAT_UINT8: u8 = 0x04;
pub const FORMAT_SINT16: u8 = 0x0E;

/// Namespace byte for Bluetooth SIG assigned description values
pub const NAMESPACE_BLUETOOTH_SIG: u8 = 0x01;
