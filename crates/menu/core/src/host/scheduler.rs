/// Deferred work submitted to the host's main loop.
pub type TickTask = Box<dyn FnOnce()>;

/// Host tick scheduler.
///
/// Tasks are fire-and-forget: there is no cancellation handle and no signal if
/// the tick never runs (for example during shutdown).
pub trait TickScheduler {
    /// Runs `task` on the next tick of the main loop, never synchronously.
    fn run_next_tick(&self, task: TickTask);
}
