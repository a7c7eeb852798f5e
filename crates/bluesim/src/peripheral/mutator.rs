//! Periodic humidity mutator.
//!
//! Simulates sensor drift: on every tick the relative humidity value
//! attribute is rewritten with a counter that increments and wraps at the
//! 8-bit boundary. The mutator owns its state explicitly and is handed to
//! the scheduler as a captured-context callback; it must only run once the
//! bootstrap has created its target handle.

use super::constants::{handles, VendorUuid};
use crate::att::AttributeStore;
use crate::timer::TickAction;
use crate::uuid::Uuid;
use log::warn;

/// State of the periodic humidity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumidityMutator {
    target_handle: u16,
    next_value: u8,
}

impl HumidityMutator {
    /// Create a mutator whose first update writes `seed`.
    pub fn new(seed: u8) -> Self {
        Self {
            target_handle: handles::THERM_HUMIDITY_VALUE,
            next_value: seed,
        }
    }

    /// The handle this mutator rewrites.
    pub fn target_handle(&self) -> u16 {
        self.target_handle
    }

    /// Write the next humidity value and advance the counter.
    ///
    /// Always signals `Continue`; the timer runs for the lifetime of the
    /// process unless externally cancelled. A store failure here means the
    /// bootstrap/scheduling order was broken, which is logged rather than
    /// surfaced since there is nothing recoverable about it at steady state.
    pub fn tick(&mut self, store: &dyn AttributeStore) -> TickAction {
        let value = self.next_value;
        self.next_value = value.wrapping_add(1);

        let uuid = Uuid::from_u16(VendorUuid::RelativeHumidity.uuid16());
        if let Err(err) = store.update(self.target_handle, uuid, vec![value]) {
            warn!(
                "humidity update on handle 0x{:04x} failed: {}",
                self.target_handle, err
            );
        }

        TickAction::Continue
    }
}
