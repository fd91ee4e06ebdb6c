//! Named item actions.
//!
//! Layout files refer to behaviour by name; the embedding code registers the
//! behaviour for each name here before menus are built.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use menu_core::{SelectAction, SelectContext};

/// Registry of select actions keyed by name.
///
/// Entries are shared: every item built with the same name runs the same
/// action instance.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Rc<dyn SelectAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, action: impl SelectAction + 'static) -> &mut Self {
        self.actions.insert(name.into(), Rc::new(action));
        self
    }

    /// Registers a closure under `name`.
    pub fn register_fn(
        &mut self,
        name: impl Into<String>,
        action: impl Fn(&SelectContext<'_>) + 'static,
    ) -> &mut Self {
        self.register(name, action)
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn SelectAction>> {
        self.actions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Returns an iterator over all registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.keys().map(String::as_str)
    }

    /// Returns the number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ActionRegistry").field("actions", &names).finish()
    }
}
