//! Listener bus implementation.

use std::cell::RefCell;
use std::rc::Rc;

use menu_core::{
    Cancellable, ClickEvent, ClickHandler, CloseEvent, CloseHandler, EventBus, EventPriority,
};
use tracing::trace;

type Handler<E> = Rc<dyn Fn(&mut E)>;

struct Listener<E> {
    priority: EventPriority,
    ignore_cancelled: bool,
    handler: Handler<E>,
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            ignore_cancelled: self.ignore_cancelled,
            handler: Rc::clone(&self.handler),
        }
    }
}

/// Listeners for one event type, kept sorted by priority.
struct Listeners<E> {
    entries: RefCell<Vec<Listener<E>>>,
}

impl<E: Cancellable> Listeners<E> {
    fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    fn register(&self, priority: EventPriority, ignore_cancelled: bool, handler: Handler<E>) {
        let mut entries = self.entries.borrow_mut();
        entries.push(Listener {
            priority,
            ignore_cancelled,
            handler,
        });
        // Stable: equal priorities keep registration order.
        entries.sort_by_key(|listener| listener.priority);
    }

    fn dispatch(&self, event: &mut E) {
        // Snapshot so handlers can register listeners or raise nested events.
        let listeners = self.entries.borrow().clone();
        for listener in listeners {
            if listener.ignore_cancelled && event.is_cancelled() {
                trace!(target: "runtime::events", priority = %listener.priority, "skipping listener, event cancelled");
                continue;
            }
            (listener.handler)(&mut *event);
        }
    }

    fn info(&self) -> Vec<ListenerInfo> {
        self.entries
            .borrow()
            .iter()
            .map(|listener| ListenerInfo {
                priority: listener.priority,
                ignore_cancelled: listener.ignore_cancelled,
            })
            .collect()
    }
}

/// Registration details of one listener (for debugging and tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerInfo {
    pub priority: EventPriority,
    pub ignore_cancelled: bool,
}

/// In-memory [`EventBus`] with host dispatch semantics.
pub struct ListenerBus {
    click: Listeners<ClickEvent>,
    close: Listeners<CloseEvent>,
}

impl ListenerBus {
    pub fn new() -> Self {
        Self {
            click: Listeners::new(),
            close: Listeners::new(),
        }
    }

    /// Delivers `event` to every click listener; returns whether it ended up cancelled.
    pub fn dispatch_click(&self, event: &mut ClickEvent) -> bool {
        self.click.dispatch(event);
        event.is_cancelled()
    }

    /// Delivers `event` to every close listener; returns whether it ended up cancelled.
    pub fn dispatch_close(&self, event: &mut CloseEvent) -> bool {
        self.close.dispatch(event);
        event.is_cancelled()
    }

    /// Click listeners in dispatch order.
    pub fn click_listeners(&self) -> Vec<ListenerInfo> {
        self.click.info()
    }

    /// Close listeners in dispatch order.
    pub fn close_listeners(&self) -> Vec<ListenerInfo> {
        self.close.info()
    }
}

impl EventBus for ListenerBus {
    fn register_click(&self, priority: EventPriority, ignore_cancelled: bool, handler: ClickHandler) {
        self.click.register(priority, ignore_cancelled, Rc::from(handler));
    }

    fn register_close(&self, priority: EventPriority, ignore_cancelled: bool, handler: CloseHandler) {
        self.close.register(priority, ignore_cancelled, Rc::from(handler));
    }
}

impl Default for ListenerBus {
    fn default() -> Self {
        Self::new()
    }
}
