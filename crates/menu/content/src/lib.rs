//! Data-driven menu definitions and loaders.
//!
//! This crate turns data files into live menus:
//! - Menu configuration (data-driven via TOML)
//! - Menu layouts: title, rows and item placement (data-driven via RON)
//! - Named item actions supplied by the embedding code
//!
//! Layouts never hold behaviour themselves; items refer to actions by name and
//! [`MenuFactory`] resolves those names when it builds the menus.

pub mod actions;
pub mod factory;
pub mod layout;
pub mod loaders;

pub use actions::ActionRegistry;
pub use factory::MenuFactory;
pub use layout::{ItemLayout, LayoutCatalog, LayoutPosition, MenuLayout};
pub use loaders::{ConfigLoader, LayoutLoader, LoadResult};
