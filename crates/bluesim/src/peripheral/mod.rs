//! The simulated peripheral profile.
//!
//! Ties the pieces together: the attribute database bootstrapper, the
//! discovery record builder, and the periodic humidity mutator, plus the
//! startup/shutdown lifecycle that drives them against the external store,
//! registry, and scheduler.

pub mod bootstrap;
pub mod constants;
pub mod mutator;
pub mod record;

#[cfg(test)]
mod tests;

pub use bootstrap::{populate, HandleRange};
pub use constants::{handles, VendorUuid, ATT_PSM, HUMIDITY_INTERVAL_SECS, INITIAL_HUMIDITY};
pub use mutator::HumidityMutator;
pub use record::build_record;

use crate::att::AttributeStore;
use crate::error::SetupError;
use crate::sdp::{RecordHandle, ServiceRegistry};
use crate::timer::{Scheduler, TimerHandle};
use log::info;
use std::sync::Arc;

/// A started peripheral: the registration handle retained for
/// deregistration, and the timer driving the humidity mutator.
pub struct Peripheral {
    record_handle: RecordHandle,
    timer: Option<TimerHandle>,
}

impl Peripheral {
    /// Bootstrap the peripheral.
    ///
    /// Populates the attribute database, registers the discovery record for
    /// the range actually populated, then schedules the humidity mutator.
    /// Every failure is fatal to the whole startup; nothing is retried and
    /// cleanup of partially added attributes belongs to the store's own
    /// lifecycle.
    pub fn start(
        store: Arc<dyn AttributeStore>,
        registry: &mut dyn ServiceRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> Result<Self, SetupError> {
        let range = bootstrap::populate(store.as_ref())?;

        let record = record::build_record(range);
        let record_handle = registry.register(record)?;

        // The mutator's first update is one past the bootstrapped value.
        let mut mutator = HumidityMutator::new(constants::INITIAL_HUMIDITY.wrapping_add(1));
        let timer_store = Arc::clone(&store);
        let timer = scheduler.schedule_periodic(
            constants::HUMIDITY_INTERVAL_SECS,
            Box::new(move || mutator.tick(timer_store.as_ref())),
        );

        info!(
            "peripheral started: handles 0x{:04x}..=0x{:04x}, record 0x{:08x}",
            range.first, range.last, record_handle
        );
        Ok(Self {
            record_handle,
            timer: Some(timer),
        })
    }

    /// The registry handle obtained at startup.
    pub fn record_handle(&self) -> RecordHandle {
        self.record_handle
    }

    /// Shut the peripheral down: cancel the mutator timer, then deregister
    /// the discovery record exactly once. Deregistration is skipped if no
    /// valid handle was retained.
    pub fn shutdown(mut self, registry: &mut dyn ServiceRegistry, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        if self.record_handle != 0 {
            registry.deregister(self.record_handle);
        }
    }
}
