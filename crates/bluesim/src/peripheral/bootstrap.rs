//! Attribute database bootstrapper.
//!
//! Populates the store with the complete attribute table of the simulated
//! peripheral: GAP and GATT services, a battery state service, a
//! thermometer service with two includes and two characteristics (each with
//! a presentation format and a user description), two secondary
//! manufacturer services, and a vendor-specific service.
//!
//! Handles are emitted strictly ascending across the whole sequence. Any
//! `add` failure aborts the bootstrap; a partially populated database is not
//! a supported state.

use super::constants::*;
use crate::att::AttributeStore;
use crate::error::SetupError;
use crate::gatt::{
    CharacteristicDeclaration, CharacteristicProperties, FormatNamespace, IncludeDeclaration,
    PresentationFormat, ServiceDeclaration, UserDescription, FORMAT_SINT16, FORMAT_UINT8,
    NAMESPACE_BLUETOOTH_SIG,
};
use crate::uuid::Uuid;
use log::debug;

/// Inclusive handle range covered by a populated attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRange {
    pub first: u16,
    pub last: u16,
}

/// Tracks the handles handed to the store, enforcing the ascending-order
/// invariant and recording the range for the discovery record.
struct DbWriter<'a> {
    store: &'a dyn AttributeStore,
    first: Option<u16>,
    last: u16,
}

impl<'a> DbWriter<'a> {
    fn new(store: &'a dyn AttributeStore) -> Self {
        Self {
            store,
            first: None,
            last: 0,
        }
    }

    fn add(&mut self, handle: u16, type_: Uuid, value: Vec<u8>) -> Result<(), SetupError> {
        assert!(
            self.first.is_none() || handle > self.last,
            "attribute handles must be strictly ascending (0x{:04x} after 0x{:04x})",
            handle,
            self.last
        );
        self.store.add(handle, type_, value)?;
        if self.first.is_none() {
            self.first = Some(handle);
        }
        self.last = handle;
        Ok(())
    }

    fn service(&mut self, handle: u16, decl: ServiceDeclaration) -> Result<(), SetupError> {
        self.add(handle, decl.attribute_type(), decl.encode())
    }

    fn characteristic(
        &mut self,
        handle: u16,
        decl: CharacteristicDeclaration,
    ) -> Result<(), SetupError> {
        assert!(
            decl.value_handle > handle,
            "characteristic value handle must lie after its declaration"
        );
        self.add(handle, decl.attribute_type(), decl.encode())
    }

    fn include(&mut self, handle: u16, decl: IncludeDeclaration) -> Result<(), SetupError> {
        self.add(handle, decl.attribute_type(), decl.encode())
    }

    fn format(&mut self, handle: u16, format: PresentationFormat) -> Result<(), SetupError> {
        self.add(handle, format.attribute_type(), format.encode())
    }

    fn user_description(&mut self, handle: u16, text: &str) -> Result<(), SetupError> {
        let desc = UserDescription(text);
        self.add(handle, desc.attribute_type(), desc.encode())
    }

    fn value(&mut self, handle: u16, type_: Uuid, value: Vec<u8>) -> Result<(), SetupError> {
        self.add(handle, type_, value)
    }

    fn range(self) -> HandleRange {
        let first = self.first.expect("bootstrap emitted no attributes");
        HandleRange {
            first,
            last: self.last,
        }
    }
}

fn read_only(value_handle: u16, uuid16: u16) -> CharacteristicDeclaration {
    CharacteristicDeclaration {
        properties: CharacteristicProperties::READ,
        value_handle,
        uuid: Uuid::from_u16(uuid16),
    }
}

/// Populate `store` with the peripheral's attribute table.
///
/// Invoked exactly once at startup, before the periodic mutator is
/// scheduled. Returns the inclusive handle range actually written, which
/// the discovery record advertises. Re-running against an already populated
/// store fails with a duplicate-handle setup error on the first conflict.
pub fn populate(store: &dyn AttributeStore) -> Result<HandleRange, SetupError> {
    let mut db = DbWriter::new(store);

    // GAP service: device name
    db.service(
        handles::GAP_SERVICE,
        ServiceDeclaration::primary(Uuid::from_u16(GENERIC_ACCESS_PROFILE_ID)),
    )?;
    db.characteristic(
        handles::GAP_DEVICE_NAME_DECL,
        read_only(handles::GAP_DEVICE_NAME_VALUE, DEVICE_NAME_UUID),
    )?;
    db.value(
        handles::GAP_DEVICE_NAME_VALUE,
        Uuid::from_u16(DEVICE_NAME_UUID),
        DEVICE_NAME.as_bytes().to_vec(),
    )?;

    // GATT service: supported attribute opcodes
    db.service(
        handles::GATT_SERVICE,
        ServiceDeclaration::primary(Uuid::from_u16(GENERIC_ATTRIB_PROFILE_ID)),
    )?;
    db.characteristic(
        handles::GATT_OPCODES_DECL,
        read_only(
            handles::GATT_OPCODES_VALUE,
            VendorUuid::OpcodesSupported.uuid16(),
        ),
    )?;
    db.value(
        handles::GATT_OPCODES_VALUE,
        Uuid::from_u16(VendorUuid::OpcodesSupported.uuid16()),
        SUPPORTED_OPCODES.to_vec(),
    )?;

    // Battery state service
    db.service(
        handles::BATTERY_SERVICE,
        ServiceDeclaration::primary(Uuid::from_u16(VendorUuid::BatteryStateService.uuid16())),
    )?;
    db.characteristic(
        handles::BATTERY_STATE_DECL,
        read_only(
            handles::BATTERY_STATE_VALUE,
            VendorUuid::BatteryState.uuid16(),
        ),
    )?;
    db.value(
        handles::BATTERY_STATE_VALUE,
        Uuid::from_u16(VendorUuid::BatteryState.uuid16()),
        vec![INITIAL_BATTERY_STATE],
    )?;

    // Thermometer service, including both manufacturer and vendor groups
    db.service(
        handles::THERM_SERVICE,
        ServiceDeclaration::primary(Uuid::from_u16(VendorUuid::ThermometerService.uuid16())),
    )?;
    db.include(
        handles::THERM_INCLUDE_MANUF,
        IncludeDeclaration {
            start_handle: handles::MANUF1_SERVICE,
            end_handle: handles::MANUF1_SERIAL_VALUE,
            service_uuid: Some(Uuid::from_u16(VendorUuid::ManufacturerService.uuid16())),
        },
    )?;
    db.include(
        handles::THERM_INCLUDE_VENDOR,
        IncludeDeclaration {
            start_handle: handles::VENDOR_SERVICE,
            end_handle: handles::VENDOR_TYPE_VALUE,
            service_uuid: None,
        },
    )?;

    // Thermometer: outside temperature
    db.characteristic(
        handles::THERM_TEMPERATURE_DECL,
        read_only(
            handles::THERM_TEMPERATURE_VALUE,
            VendorUuid::Temperature.uuid16(),
        ),
    )?;
    db.value(
        handles::THERM_TEMPERATURE_VALUE,
        Uuid::from_u16(VendorUuid::Temperature.uuid16()),
        INITIAL_TEMPERATURE.to_le_bytes().to_vec(),
    )?;
    db.format(
        handles::THERM_TEMPERATURE_FORMAT,
        PresentationFormat {
            format: FORMAT_SINT16,
            exponent: -2,
            unit: VendorUuid::FormatCelsius.uuid16(),
            namespace: FormatNamespace::Byte(NAMESPACE_BLUETOOTH_SIG),
            description: VendorUuid::FormatOutside.uuid16(),
        },
    )?;
    db.user_description(handles::THERM_TEMPERATURE_DESC, DESC_OUTSIDE_TEMPERATURE)?;

    // Thermometer: outside relative humidity
    db.characteristic(
        handles::THERM_HUMIDITY_DECL,
        read_only(
            handles::THERM_HUMIDITY_VALUE,
            VendorUuid::RelativeHumidity.uuid16(),
        ),
    )?;
    db.value(
        handles::THERM_HUMIDITY_VALUE,
        Uuid::from_u16(VendorUuid::RelativeHumidity.uuid16()),
        vec![INITIAL_HUMIDITY],
    )?;
    db.format(
        handles::THERM_HUMIDITY_FORMAT,
        PresentationFormat {
            format: FORMAT_UINT8,
            exponent: 0,
            unit: VendorUuid::FormatPercent.uuid16(),
            namespace: FormatNamespace::Uuid16(VendorUuid::BluetoothSig.uuid16()),
            description: VendorUuid::FormatOutside.uuid16(),
        },
    )?;
    db.user_description(handles::THERM_HUMIDITY_DESC, DESC_OUTSIDE_HUMIDITY)?;

    // Manufacturer service, first instance
    db.service(
        handles::MANUF1_SERVICE,
        ServiceDeclaration::secondary(Uuid::from_u16(VendorUuid::ManufacturerService.uuid16())),
    )?;
    db.characteristic(
        handles::MANUF1_NAME_DECL,
        read_only(
            handles::MANUF1_NAME_VALUE,
            VendorUuid::ManufacturerName.uuid16(),
        ),
    )?;
    db.value(
        handles::MANUF1_NAME_VALUE,
        Uuid::from_u16(VendorUuid::ManufacturerName.uuid16()),
        MANUFACTURER_NAME_1.as_bytes().to_vec(),
    )?;
    db.characteristic(
        handles::MANUF1_SERIAL_DECL,
        read_only(
            handles::MANUF1_SERIAL_VALUE,
            VendorUuid::ManufacturerSerial.uuid16(),
        ),
    )?;
    db.value(
        handles::MANUF1_SERIAL_VALUE,
        Uuid::from_u16(VendorUuid::ManufacturerSerial.uuid16()),
        SERIAL_NUMBER_1.as_bytes().to_vec(),
    )?;

    // Manufacturer service, second instance
    db.service(
        handles::MANUF2_SERVICE,
        ServiceDeclaration::secondary(Uuid::from_u16(VendorUuid::ManufacturerService.uuid16())),
    )?;
    db.characteristic(
        handles::MANUF2_NAME_DECL,
        read_only(
            handles::MANUF2_NAME_VALUE,
            VendorUuid::ManufacturerName.uuid16(),
        ),
    )?;
    db.value(
        handles::MANUF2_NAME_VALUE,
        Uuid::from_u16(VendorUuid::ManufacturerName.uuid16()),
        MANUFACTURER_NAME_2.as_bytes().to_vec(),
    )?;
    db.characteristic(
        handles::MANUF2_SERIAL_DECL,
        read_only(
            handles::MANUF2_SERIAL_VALUE,
            VendorUuid::ManufacturerSerial.uuid16(),
        ),
    )?;
    db.value(
        handles::MANUF2_SERIAL_VALUE,
        Uuid::from_u16(VendorUuid::ManufacturerSerial.uuid16()),
        SERIAL_NUMBER_2.as_bytes().to_vec(),
    )?;

    // Vendor-specific service
    db.service(
        handles::VENDOR_SERVICE,
        ServiceDeclaration::secondary(Uuid::from_u16(VendorUuid::VendorSpecificService.uuid16())),
    )?;
    db.characteristic(
        handles::VENDOR_TYPE_DECL,
        read_only(
            handles::VENDOR_TYPE_VALUE,
            VendorUuid::VendorSpecificType.uuid16(),
        ),
    )?;
    db.value(
        handles::VENDOR_TYPE_VALUE,
        Uuid::from_u16(VendorUuid::VendorSpecificType.uuid16()),
        VENDOR_TYPE.to_vec(),
    )?;

    let range = db.range();
    debug!(
        "attribute database populated, handles 0x{:04x}..=0x{:04x}",
        range.first, range.last
    );
    Ok(range)
}
