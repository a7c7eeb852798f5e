//! Example bootstrapping the simulated peripheral against the in-memory
//! attribute store and registry, with a minimal inline scheduler standing in
//! for the external event loop.

use bluesim::peripheral::handles;
use bluesim::{
    AttributeDatabase, AttributeStore, PeriodicCallback, Peripheral, Scheduler, SdpRegistry,
    TickAction, TimerHandle,
};
use std::sync::Arc;

/// Scheduler that fires every active timer once per `run_ticks` round.
struct LoopScheduler {
    timers: Vec<(TimerHandle, PeriodicCallback)>,
    next_id: u32,
}

impl LoopScheduler {
    fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    fn run_ticks(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.timers
                .retain_mut(|(_, callback)| callback() == TickAction::Continue);
        }
    }
}

impl Scheduler for LoopScheduler {
    fn schedule_periodic(&mut self, _interval_secs: u32, callback: PeriodicCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push((handle, callback));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(AttributeDatabase::new());
    let mut registry = SdpRegistry::new();
    let mut scheduler = LoopScheduler::new();

    let peripheral = Peripheral::start(store.clone(), &mut registry, &mut scheduler)?;
    println!(
        "peripheral started: {} attributes, record handle 0x{:08x}",
        store.len(),
        peripheral.record_handle()
    );

    let record = registry
        .record(peripheral.record_handle())
        .expect("record is registered");
    println!("discovery record: {} bytes", record.encode().len());

    // Simulate three timer intervals of humidity drift
    scheduler.run_ticks(3);
    let humidity = store.get(handles::THERM_HUMIDITY_VALUE)?;
    println!("humidity after three ticks: 0x{:02x}", humidity.value[0]);

    peripheral.shutdown(&mut registry, &mut scheduler);
    println!("peripheral shut down");
    Ok(())
}
