//! Content loaders for reading menu data from files.
//!
//! Loaders convert TOML/RON files into the types defined in [`crate::layout`]
//! and [`menu_core::MenuConfig`].

pub mod config;
pub mod layout;

pub use config::ConfigLoader;
pub use layout::LayoutLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
