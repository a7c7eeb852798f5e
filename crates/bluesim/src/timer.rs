//! Timer/scheduler collaborator contract.
//!
//! The peripheral never owns an event loop; it hands a periodic callback to
//! an external single-threaded scheduler and keeps the returned handle for
//! cancellation at shutdown. Invocations of one timer's callback are
//! mutually exclusive by construction.

/// Signal returned by a periodic callback after each invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Keep the timer firing.
    Continue,
    /// Stop the timer; no further invocations.
    Stop,
}

/// A periodic callback owned by the scheduler once registered.
pub type PeriodicCallback = Box<dyn FnMut() -> TickAction + Send>;

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// Contract of the external timer/scheduler.
pub trait Scheduler {
    /// Schedule `callback` to fire every `interval_secs` seconds until it
    /// returns [`TickAction::Stop`] or the timer is cancelled.
    fn schedule_periodic(&mut self, interval_secs: u32, callback: PeriodicCallback) -> TimerHandle;

    /// Cancel a scheduled timer. Cancelling an already-finished timer is a
    /// no-op.
    fn cancel(&mut self, handle: TimerHandle);
}
