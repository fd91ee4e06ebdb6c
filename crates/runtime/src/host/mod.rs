//! In-memory host inventories and viewers.

mod memory;

pub use memory::{MemoryHost, OpenView};
