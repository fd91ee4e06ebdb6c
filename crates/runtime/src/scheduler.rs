//! Tick scheduler backed by a plain queue.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use menu_core::{TickScheduler, TickTask};
use tracing::trace;

/// Queue of tasks waiting for the next tick.
///
/// [`run_tick`](Self::run_tick) runs exactly the tasks queued before it was
/// called; anything a task schedules waits for the following tick.
pub struct TickQueue {
    pending: RefCell<VecDeque<TickTask>>,
    tick: Cell<u64>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            tick: Cell::new(0),
        }
    }

    /// Number of ticks run so far.
    pub fn current_tick(&self) -> u64 {
        self.tick.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Advances one tick and runs the tasks that were due. Returns how many ran.
    pub fn run_tick(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let tick = self.tick.get() + 1;
        self.tick.set(tick);

        let count = due.len();
        trace!(target: "runtime::scheduler", tick, tasks = count, "running tick");
        for task in due {
            task();
        }
        count
    }
}

impl TickScheduler for TickQueue {
    fn run_next_tick(&self, task: TickTask) {
        self.pending.borrow_mut().push_back(task);
    }
}

impl Default for TickQueue {
    fn default() -> Self {
        Self::new()
    }
}
