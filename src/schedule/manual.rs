use std::cell::{Cell, RefCell};
use std::thread::{self, ThreadId};
use std::time::Duration;

use crate::schedule::ticker::{TickFn, TickScheduler, TickToken};

struct Entry {
    token: TickToken,
    due_ms: u64,
    tick: TickFn,
}

/// A deterministic, manually pumped [`TickScheduler`].
///
/// Time is a virtual millisecond clock that only advances when a queued
/// callback is run; nothing fires on its own. That makes it the scheduler
/// of choice for tests and for hosts that want to drive blink ticks from
/// their own frame loop.
///
/// Callbacks run in due-time order, ties broken by scheduling order. The
/// owning context is the thread that created the scheduler; the type is
/// additionally `!Send`, so handing it to another thread does not compile.
pub struct ManualScheduler {
    queue: RefCell<Vec<Entry>>,
    now_ms: Cell<u64>,
    next_token: Cell<u64>,
    owner: ThreadId,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
            now_ms: Cell::new(0),
            next_token: Cell::new(0),
            owner: thread::current().id(),
        }
    }

    /// Number of callbacks currently queued.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Run the next due callback, advancing the clock to its due time.
    ///
    /// Returns `false` when the queue is empty. The callback is invoked
    /// after the queue borrow is released, so it may schedule or cancel
    /// freely.
    pub fn run_next(&self) -> bool {
        let tick = {
            let mut queue = self.queue.borrow_mut();
            if queue.is_empty() {
                return false;
            }
            let mut best = 0;
            for (i, entry) in queue.iter().enumerate().skip(1) {
                let best_key = (queue[best].due_ms, queue[best].token.raw());
                if (entry.due_ms, entry.token.raw()) < best_key {
                    best = i;
                }
            }
            let entry = queue.remove(best);
            if entry.due_ms > self.now_ms.get() {
                self.now_ms.set(entry.due_ms);
            }
            entry.tick
        };
        tick();
        true
    }

    /// Run up to `ticks` callbacks; returns how many actually ran.
    pub fn run(&self, ticks: usize) -> usize {
        let mut ran = 0;
        while ran < ticks && self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, tick: TickFn) -> TickToken {
        let token = TickToken::new(self.next_token.get());
        self.next_token.set(token.raw() + 1);
        self.queue.borrow_mut().push(Entry {
            token,
            due_ms: self.now_ms.get() + delay.as_millis() as u64,
            tick,
        });
        token
    }

    fn cancel(&self, token: TickToken) {
        self.queue.borrow_mut().retain(|entry| entry.token != token);
    }

    fn is_owning_context(&self) -> bool {
        thread::current().id() == self.owner
    }
}
