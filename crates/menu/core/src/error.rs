//! Usage errors surfaced by menu operations.
//!
//! Only caller bugs are errors. Routine UI races (selecting an empty slot,
//! adding to an occupied slot, closing for someone who already left) are
//! reported as `Ok(false)` or ignored, never as `Err`.

use crate::slot::{PlayerId, SlotIndex};

pub type Result<T> = core::result::Result<T, MenuError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("{player} is already viewing {title}")]
    AlreadyViewing { player: PlayerId, title: String },

    #[error("slot {slot} is outside a menu of {size} slots")]
    SlotOutOfRange { slot: SlotIndex, size: usize },

    #[error("menus must have between 1 and {max} rows, got {rows}")]
    InvalidRows { rows: usize, max: usize },
}

impl MenuError {
    /// Returns a static identifier for this error variant.
    ///
    /// Useful for log fields and test assertions.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyViewing { .. } => "already_viewing",
            Self::SlotOutOfRange { .. } => "slot_out_of_range",
            Self::InvalidRows { .. } => "invalid_rows",
        }
    }
}
