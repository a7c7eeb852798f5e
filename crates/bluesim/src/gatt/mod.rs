//! GATT declaration layer.
//!
//! Typed encoders for the declaration values stored in the attribute
//! database. The bootstrap code builds every table entry through these
//! instead of hand-assembling byte arrays.

pub mod declarations;
pub mod types;


pub use declarations::{
    CharacteristicDeclaration, FormatNamespace, IncludeDeclaration, PresentationFormat,
    ServiceDeclaration, UserDescription,
};
pub use types::{CharacteristicProperties, FORMAT_SINT16, FORMAT_UINT8, NAMESPACE_BLUETOOTH_SIG};
