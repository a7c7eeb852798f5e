//! Protocol constants, vendor UUID table, and handle layout for the
//! simulated peripheral.

// PSM of the peripheral's attribute-protocol channel
pub const ATT_PSM: u16 = 27;

// Well-known SDP UUIDs
pub const PUBLIC_BROWSE_GROUP: u16 = 0x1002;
pub const L2CAP_PROTOCOL_UUID: u16 = 0x0100;
pub const ATT_PROTOCOL_UUID: u16 = 0x0007;
pub const GENERIC_ATTRIB_SVCLASS_ID: u16 = 0x1801;
pub const GENERIC_ATTRIB_PROFILE_ID: u16 = 0x1801;
pub const GATT_PROFILE_VERSION: u16 = 0x0100;

// SIG-assigned service and characteristic UUIDs
pub const GENERIC_ACCESS_PROFILE_ID: u16 = 0x1800;
pub const DEVICE_NAME_UUID: u16 = 0x2A00;

/// Vendor-assigned 16-bit UUIDs used by the simulated profile.
///
/// These are not SIG assigned numbers; they identify the simulated services
/// and characteristics and are encoded exactly like assigned ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum VendorUuid {
    OpcodesSupported = 0xA001,
    BatteryStateService = 0xA002,
    BatteryState = 0xA003,
    ThermometerService = 0xA004,
    ManufacturerService = 0xA005,
    Temperature = 0xA006,
    FormatCelsius = 0xA007,
    FormatOutside = 0xA008,
    RelativeHumidity = 0xA009,
    FormatPercent = 0xA00A,
    BluetoothSig = 0xA00B,
    ManufacturerName = 0xA00C,
    ManufacturerSerial = 0xA00D,
    VendorSpecificService = 0xA00E,
    VendorSpecificType = 0xA00F,
}

impl VendorUuid {
    pub const fn uuid16(self) -> u16 {
        self as u16
    }
}

/// Handle layout of the attribute table.
///
/// Gaps between service groups are reserved for future extension and must
/// never be reused.
pub mod handles {
    // GAP service
    pub const GAP_SERVICE: u16 = 0x0001;
    pub const GAP_DEVICE_NAME_DECL: u16 = 0x0004;
    pub const GAP_DEVICE_NAME_VALUE: u16 = 0x0006;

    // GATT service
    pub const GATT_SERVICE: u16 = 0x0010;
    pub const GATT_OPCODES_DECL: u16 = 0x0011;
    pub const GATT_OPCODES_VALUE: u16 = 0x0012;

    // Battery state service
    pub const BATTERY_SERVICE: u16 = 0x0100;
    pub const BATTERY_STATE_DECL: u16 = 0x0106;
    pub const BATTERY_STATE_VALUE: u16 = 0x0110;

    // Thermometer service
    pub const THERM_SERVICE: u16 = 0x0200;
    pub const THERM_INCLUDE_MANUF: u16 = 0x0201;
    pub const THERM_INCLUDE_VENDOR: u16 = 0x0202;
    pub const THERM_TEMPERATURE_DECL: u16 = 0x0203;
    pub const THERM_TEMPERATURE_VALUE: u16 = 0x0204;
    pub const THERM_TEMPERATURE_FORMAT: u16 = 0x0205;
    pub const THERM_TEMPERATURE_DESC: u16 = 0x0206;
    pub const THERM_HUMIDITY_DECL: u16 = 0x0210;
    pub const THERM_HUMIDITY_VALUE: u16 = 0x0212;
    pub const THERM_HUMIDITY_FORMAT: u16 = 0x0213;
    pub const THERM_HUMIDITY_DESC: u16 = 0x0214;

    // Manufacturer service, first instance (secondary)
    pub const MANUF1_SERVICE: u16 = 0x0500;
    pub const MANUF1_NAME_DECL: u16 = 0x0501;
    pub const MANUF1_NAME_VALUE: u16 = 0x0502;
    pub const MANUF1_SERIAL_DECL: u16 = 0x0503;
    pub const MANUF1_SERIAL_VALUE: u16 = 0x0504;

    // Manufacturer service, second instance (secondary)
    pub const MANUF2_SERVICE: u16 = 0x0505;
    pub const MANUF2_NAME_DECL: u16 = 0x0506;
    pub const MANUF2_NAME_VALUE: u16 = 0x0507;
    pub const MANUF2_SERIAL_DECL: u16 = 0x0508;
    pub const MANUF2_SERIAL_VALUE: u16 = 0x0509;

    // Vendor-specific service (secondary)
    pub const VENDOR_SERVICE: u16 = 0x0550;
    pub const VENDOR_TYPE_DECL: u16 = 0x0560;
    pub const VENDOR_TYPE_VALUE: u16 = 0x0568;
}

// Free-text values served from the table
pub const DEVICE_NAME: &str = "Example Device";
pub const DESC_OUTSIDE_TEMPERATURE: &str = "Outside Temperature";
pub const DESC_OUTSIDE_HUMIDITY: &str = "Outside Relative Humidity";
pub const MANUFACTURER_NAME_1: &str = "ACME Temperature Sensor";
pub const MANUFACTURER_NAME_2: &str = "ACME Weighing Scales";
pub const SERIAL_NUMBER_1: &str = "237495-3282-A";
pub const SERIAL_NUMBER_2: &str = "11267-2327A00239";
pub const VENDOR_TYPE: &[u8] = b"Vendor";

// Discovery record metadata
pub const SERVICE_NAME: &str = "Generic Attribute Profile";
pub const PROVIDER_NAME: &str = "bluesim";
pub const SERVICE_URL: &str = "https://example.com/bluesim";

// Initial characteristic values
pub const SUPPORTED_OPCODES: [u8; 2] = [0xFF, 0x01];
pub const INITIAL_BATTERY_STATE: u8 = 0x04;
/// 6.50 degrees Celsius with the format descriptor's exponent of -2
pub const INITIAL_TEMPERATURE: i16 = 650;
pub const INITIAL_HUMIDITY: u8 = 0x27;

/// Interval between humidity updates
pub const HUMIDITY_INTERVAL_SECS: u32 = 10;
