//! Menu configuration loader.

use std::path::Path;

use menu_core::MenuConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for menu configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`MenuConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<MenuConfig> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse config data from TOML text.
    pub fn from_str(content: &str) -> LoadResult<MenuConfig> {
        let config: MenuConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
