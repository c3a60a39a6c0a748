use std::time::Duration;

use crate::foundation::error::{BlinkmarkError, BlinkmarkResult};

/// Identity of one scheduled callback.
///
/// Cancellation is by token, not by flag: cancelling a token prevents that
/// specific callback from running even if it was already queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

impl TickToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A single scheduled unit of work.
pub type TickFn = Box<dyn FnOnce()>;

/// The sole timing primitive the blink controller needs.
///
/// Implementations wrap whatever drives the hosting view: a UI-thread
/// handler, an event-loop proxy, a test clock. The scheduler *is* the
/// execution context: everything it runs is serialized, and
/// [`TickScheduler::is_owning_context`] reports whether the caller is on
/// that context right now.
pub trait TickScheduler {
    /// Queue `tick` to run after `delay` on the owning context.
    fn schedule(&self, delay: Duration, tick: TickFn) -> TickToken;

    /// Drop a queued callback. Unknown or already-run tokens are ignored.
    fn cancel(&self, token: TickToken);

    /// Whether the current thread of control is the owning context.
    fn is_owning_context(&self) -> bool;
}

/// Guard helper: fail with a context error unless called on the owning
/// execution context. Checked at the top of every mutating controller
/// operation, before any state changes.
pub fn ensure_owning_context(
    scheduler: &dyn TickScheduler,
    operation: &str,
) -> BlinkmarkResult<()> {
    if scheduler.is_owning_context() {
        Ok(())
    } else {
        Err(BlinkmarkError::context(format!(
            "{operation} must run on the execution context owning the marker"
        )))
    }
}
