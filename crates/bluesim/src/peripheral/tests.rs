//! Unit tests for the peripheral bootstrap, record, and mutator

use super::bootstrap::{populate, HandleRange};
use super::constants::{handles, ATT_PSM};
use super::mutator::HumidityMutator;
use super::record::build_record;
use super::Peripheral;
use crate::att::{
    AttributeDatabase, AttributeStore, StoreError, StoreResult, CHARACTERISTIC_UUID,
    PRIMARY_SERVICE_UUID,
};
use crate::error::SetupError;
use crate::gatt::{CharacteristicDeclaration, CharacteristicProperties, ServiceDeclaration};
use crate::sdp::{
    AttributeId, DataElement, RecordHandle, RegistryError, SdpRegistry, ServiceRecord,
    ServiceRegistry,
};
use crate::timer::{PeriodicCallback, Scheduler, TickAction, TimerHandle};
use crate::uuid::Uuid;
use std::sync::{Arc, Mutex};

/// Mock scheduler that fires timers on demand
struct MockScheduler {
    timers: Vec<(TimerHandle, u32, PeriodicCallback)>,
    next_id: u32,
    cancelled: Vec<TimerHandle>,
}

impl MockScheduler {
    fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
            cancelled: Vec::new(),
        }
    }

    fn fire_all(&mut self) {
        for (handle, _, callback) in &mut self.timers {
            if !self.cancelled.contains(handle) {
                callback();
            }
        }
    }
}

impl Scheduler for MockScheduler {
    fn schedule_periodic(&mut self, interval_secs: u32, callback: PeriodicCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push((handle, interval_secs, callback));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
    }
}

/// Store wrapper that records every update call
struct RecordingStore {
    inner: AttributeDatabase,
    updates: Mutex<Vec<(u16, Vec<u8>)>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            inner: AttributeDatabase::new(),
            updates: Mutex::new(Vec::new()),
        }
    }
}

impl AttributeStore for RecordingStore {
    fn add(&self, handle: u16, type_: Uuid, value: Vec<u8>) -> StoreResult<()> {
        self.inner.add(handle, type_, value)
    }

    fn update(&self, handle: u16, type_: Uuid, value: Vec<u8>) -> StoreResult<()> {
        self.updates.lock().unwrap().push((handle, value.clone()));
        self.inner.update(handle, type_, value)
    }

    fn get(&self, handle: u16) -> StoreResult<crate::att::Attribute> {
        self.inner.get(handle)
    }
}

/// Registry that hands out a fixed handle and counts deregistrations
struct FixedHandleRegistry {
    handle: RecordHandle,
    deregistrations: u32,
}

impl ServiceRegistry for FixedHandleRegistry {
    fn register(&mut self, _record: ServiceRecord) -> Result<RecordHandle, RegistryError> {
        Ok(self.handle)
    }

    fn deregister(&mut self, _handle: RecordHandle) {
        self.deregistrations += 1;
    }
}

#[test]
fn bootstrap_handles_strictly_ascending() {
    let db = AttributeDatabase::new();
    let range = populate(&db).unwrap();

    let handles: Vec<u16> = db.dump().iter().map(|a| a.handle).collect();
    assert!(!handles.is_empty());
    for pair in handles.windows(2) {
        assert!(pair[0] < pair[1], "handles regress at 0x{:04x}", pair[1]);
    }

    assert_eq!(range.first, *handles.first().unwrap());
    assert_eq!(range.last, *handles.last().unwrap());
    assert_eq!(range.first, handles::GAP_SERVICE);
    assert_eq!(range.last, handles::VENDOR_TYPE_VALUE);
}

#[test]
fn characteristic_declarations_point_forward() {
    let db = AttributeDatabase::new();
    populate(&db).unwrap();

    let mut seen = 0;
    for attr in db.dump() {
        if attr.type_ != Uuid::from_u16(CHARACTERISTIC_UUID) {
            continue;
        }
        seen += 1;
        let value_handle = u16::from_le_bytes([attr.value[1], attr.value[2]]);
        assert!(
            value_handle > attr.handle,
            "declaration 0x{:04x} points backwards to 0x{:04x}",
            attr.handle,
            value_handle
        );
        let target = db.get(value_handle).unwrap();
        // The declaration's trailing UUID matches the value attribute's type
        assert_eq!(attr.value[3..], target.type_.to_be_bytes());
    }
    assert_eq!(seen, 10, "expected ten characteristic declarations");
}

#[test]
fn declaration_uuids_are_big_endian() {
    let db = AttributeDatabase::new();
    populate(&db).unwrap();

    // GAP primary service declaration: value is the service UUID 0x1800 BE
    let gap = db.get(handles::GAP_SERVICE).unwrap();
    assert_eq!(gap.type_, Uuid::from_u16(PRIMARY_SERVICE_UUID));
    assert_eq!(gap.value, vec![0x18, 0x00]);

    // Device name declaration: props, handle LE, UUID BE
    let name_decl = db.get(handles::GAP_DEVICE_NAME_DECL).unwrap();
    assert_eq!(name_decl.value, vec![0x02, 0x06, 0x00, 0x2A, 0x00]);

    // Temperature format descriptor: unit and description UUIDs BE
    let fmt = db.get(handles::THERM_TEMPERATURE_FORMAT).unwrap();
    assert_eq!(fmt.value, vec![0x0E, 0xFE, 0xA0, 0x07, 0x01, 0xA0, 0x08]);

    // Humidity format descriptor: 8-byte layout with a namespace UUID
    let fmt = db.get(handles::THERM_HUMIDITY_FORMAT).unwrap();
    assert_eq!(
        fmt.value,
        vec![0x04, 0x00, 0xA0, 0x0A, 0xA0, 0x0B, 0xA0, 0x08]
    );
}

#[test]
fn include_declarations_match_layout() {
    let db = AttributeDatabase::new();
    populate(&db).unwrap();

    let manuf = db.get(handles::THERM_INCLUDE_MANUF).unwrap();
    assert_eq!(manuf.value, vec![0x00, 0x05, 0x04, 0x05, 0xA0, 0x05]);

    let vendor = db.get(handles::THERM_INCLUDE_VENDOR).unwrap();
    assert_eq!(vendor.value, vec![0x50, 0x05, 0x68, 0x05]);
}

#[test]
fn initial_values_match_profile() {
    let db = AttributeDatabase::new();
    populate(&db).unwrap();

    assert_eq!(
        db.get(handles::GAP_DEVICE_NAME_VALUE).unwrap().value,
        b"Example Device".to_vec()
    );
    assert_eq!(
        db.get(handles::GATT_OPCODES_VALUE).unwrap().value,
        vec![0xFF, 0x01]
    );
    assert_eq!(
        db.get(handles::BATTERY_STATE_VALUE).unwrap().value,
        vec![0x04]
    );
    // 650 (6.50 C at exponent -2), least-significant byte first
    assert_eq!(
        db.get(handles::THERM_TEMPERATURE_VALUE).unwrap().value,
        vec![0x8A, 0x02]
    );
    assert_eq!(
        db.get(handles::THERM_HUMIDITY_VALUE).unwrap().value,
        vec![0x27]
    );
    assert_eq!(
        db.get(handles::VENDOR_TYPE_VALUE).unwrap().value,
        b"Vendor".to_vec()
    );
}

#[test]
fn bootstrap_is_deterministic() {
    let first = AttributeDatabase::new();
    let second = AttributeDatabase::new();
    populate(&first).unwrap();
    populate(&second).unwrap();

    assert_eq!(first.dump(), second.dump());
}

#[test]
fn populate_twice_fails_on_first_conflicting_handle() {
    let db = AttributeDatabase::new();
    populate(&db).unwrap();
    let before = db.dump();

    match populate(&db) {
        Err(SetupError::Store(StoreError::DuplicateHandle(handle))) => {
            assert_eq!(handle, handles::GAP_SERVICE);
        }
        other => panic!("expected duplicate handle error, got {:?}", other.map(|_| ())),
    }

    // Nothing was silently overwritten
    assert_eq!(db.dump(), before);
}

#[test]
fn minimal_two_attribute_service() {
    let db = AttributeDatabase::new();

    let svc = ServiceDeclaration::primary(Uuid::from_u16(0x1800));
    db.add(0x0001, svc.attribute_type(), svc.encode()).unwrap();

    let decl = CharacteristicDeclaration {
        properties: CharacteristicProperties::READ,
        value_handle: 0x0003,
        uuid: Uuid::from_u16(0x2A00),
    };
    db.add(0x0002, decl.attribute_type(), decl.encode()).unwrap();
    db.add(0x0003, Uuid::from_u16(0x2A00), vec![0xAB, 0xCD])
        .unwrap();

    assert_eq!(db.len(), 3);
    assert_eq!(db.get(0x0001).unwrap().value, vec![0x18, 0x00]);
    assert_eq!(
        db.get(0x0002).unwrap().value,
        vec![0x02, 0x03, 0x00, 0x2A, 0x00]
    );
    assert_eq!(db.get(0x0003).unwrap().value, vec![0xAB, 0xCD]);
}

#[test]
fn record_range_matches_populated_handles() {
    let db = AttributeDatabase::new();
    let range = populate(&db).unwrap();
    let record = build_record(range);

    let chain = record
        .attribute(AttributeId::ProtocolDescriptorList.id())
        .expect("record has a protocol descriptor list");

    let layers = match chain {
        DataElement::Sequence(layers) => layers,
        other => panic!("unexpected protocol list shape: {:?}", other),
    };
    assert_eq!(layers.len(), 2);

    // Outer layer: L2CAP with the ATT PSM
    assert_eq!(
        layers[0],
        DataElement::Sequence(vec![
            DataElement::Uuid(Uuid::from_u16(0x0100)),
            DataElement::Unsigned16(ATT_PSM),
        ])
    );

    // Inner layer: ATT with the populated handle range
    assert_eq!(
        layers[1],
        DataElement::Sequence(vec![
            DataElement::Uuid(Uuid::from_u16(0x0007)),
            DataElement::Unsigned16(range.first),
            DataElement::Unsigned16(range.last),
        ])
    );
}

#[test]
fn record_metadata_and_encoding() {
    let range = HandleRange {
        first: 0x0001,
        last: 0x0568,
    };
    let record = build_record(range);

    assert_eq!(record.service_classes(), vec![Uuid::from_u16(0x1801)]);
    // All three URL attributes are present and identical
    let doc = record.attribute(AttributeId::DocumentationUrl.id());
    assert!(doc.is_some());
    assert_eq!(doc, record.attribute(AttributeId::ClientExecutableUrl.id()));
    assert_eq!(doc, record.attribute(AttributeId::IconUrl.id()));

    // And the whole record encodes deterministically
    assert_eq!(record.encode(), build_record(range).encode());
}

#[test]
fn mutator_writes_incrementing_values() {
    let store = RecordingStore::new();
    populate(&store).unwrap();

    let mut mutator = HumidityMutator::new(0x28);
    assert_eq!(mutator.target_handle(), handles::THERM_HUMIDITY_VALUE);

    for _ in 0..3 {
        assert_eq!(mutator.tick(&store), TickAction::Continue);
    }

    let updates = store.updates.lock().unwrap();
    assert_eq!(
        *updates,
        vec![
            (handles::THERM_HUMIDITY_VALUE, vec![0x28]),
            (handles::THERM_HUMIDITY_VALUE, vec![0x29]),
            (handles::THERM_HUMIDITY_VALUE, vec![0x2A]),
        ]
    );
}

#[test]
fn mutator_wraps_at_u8_boundary() {
    let store = RecordingStore::new();
    populate(&store).unwrap();

    let mut mutator = HumidityMutator::new(0xFF);
    mutator.tick(&store);
    mutator.tick(&store);

    let updates = store.updates.lock().unwrap();
    assert_eq!(updates[0].1, vec![0xFF]);
    assert_eq!(updates[1].1, vec![0x00]);
}

#[test]
fn mutator_survives_missing_handle() {
    // No populate: the target handle does not exist. The anomaly is logged
    // and the timer keeps running.
    let db = AttributeDatabase::new();
    let mut mutator = HumidityMutator::new(0x28);
    assert_eq!(mutator.tick(&db), TickAction::Continue);
}

#[test]
fn peripheral_lifecycle() {
    let store = Arc::new(AttributeDatabase::new());
    let mut registry = SdpRegistry::new();
    let mut scheduler = MockScheduler::new();

    let peripheral =
        Peripheral::start(store.clone(), &mut registry, &mut scheduler).unwrap();
    assert_ne!(peripheral.record_handle(), 0);
    assert_eq!(registry.len(), 1);
    assert_eq!(scheduler.timers.len(), 1);
    assert_eq!(scheduler.timers[0].1, 10);

    // Three timer fires advance the humidity value from 0x27 to 0x2A
    scheduler.fire_all();
    scheduler.fire_all();
    scheduler.fire_all();
    assert_eq!(
        store.get(handles::THERM_HUMIDITY_VALUE).unwrap().value,
        vec![0x2A]
    );

    let timer = scheduler.timers[0].0;
    peripheral.shutdown(&mut registry, &mut scheduler);
    assert!(registry.is_empty());
    assert_eq!(scheduler.cancelled, vec![timer]);
}

#[test]
fn shutdown_skips_deregistration_for_zero_handle() {
    let store = Arc::new(AttributeDatabase::new());
    let mut registry = FixedHandleRegistry {
        handle: 0,
        deregistrations: 0,
    };
    let mut scheduler = MockScheduler::new();

    let peripheral = Peripheral::start(store, &mut registry, &mut scheduler).unwrap();
    assert_eq!(peripheral.record_handle(), 0);

    peripheral.shutdown(&mut registry, &mut scheduler);
    assert_eq!(registry.deregistrations, 0);
    // The mutator timer is still cancelled
    assert_eq!(scheduler.cancelled.len(), 1);
}

#[test]
fn start_fails_against_populated_store() {
    let store = Arc::new(AttributeDatabase::new());
    populate(store.as_ref()).unwrap();

    let mut registry = SdpRegistry::new();
    let mut scheduler = MockScheduler::new();
    let result = Peripheral::start(store, &mut registry, &mut scheduler);

    assert!(matches!(
        result,
        Err(SetupError::Store(StoreError::DuplicateHandle(_)))
    ));
    // Nothing was registered or scheduled
    assert!(registry.is_empty());
    assert!(scheduler.timers.is_empty());
}
