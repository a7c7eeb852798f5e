//! Discovery record builder.
//!
//! Builds the service record that lets peers locate the peripheral's
//! attribute server: the Generic Attribute service class and profile, and a
//! two-layer access protocol chain of L2CAP (with the ATT PSM) and ATT
//! (with the handle range the server exposes).

use super::bootstrap::HandleRange;
use super::constants::*;
use crate::sdp::{DataElement, ProfileDescriptor, ProtocolDescriptor, ServiceRecord};
use crate::uuid::Uuid;

/// Build the discovery record for an attribute server exposing `range`.
///
/// Pure construction. The handle range embedded in the inner protocol layer
/// is the range actually populated, so `populate` runs first and feeds its
/// result here.
pub fn build_record(range: HandleRange) -> ServiceRecord {
    let gatt_uuid = Uuid::from_u16(GENERIC_ATTRIB_SVCLASS_ID);
    let mut record = ServiceRecord::new();

    record.set_browse_groups(vec![Uuid::from_u16(PUBLIC_BROWSE_GROUP)]);
    record.set_service_classes(vec![gatt_uuid]);
    record.set_profile_descriptors(vec![ProfileDescriptor {
        uuid: Uuid::from_u16(GENERIC_ATTRIB_PROFILE_ID),
        version: GATT_PROFILE_VERSION,
    }]);
    record.set_access_protocols(vec![
        ProtocolDescriptor {
            uuid: Uuid::from_u16(L2CAP_PROTOCOL_UUID),
            params: vec![DataElement::Unsigned16(ATT_PSM)],
        },
        ProtocolDescriptor {
            uuid: Uuid::from_u16(ATT_PROTOCOL_UUID),
            params: vec![
                DataElement::Unsigned16(range.first),
                DataElement::Unsigned16(range.last),
            ],
        },
    ]);
    record.set_info(SERVICE_NAME, PROVIDER_NAME, None);
    record.set_urls(SERVICE_URL, SERVICE_URL, SERVICE_URL);
    record.set_service_id(gatt_uuid);

    record
}
