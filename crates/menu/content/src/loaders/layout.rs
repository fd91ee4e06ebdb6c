//! Menu layout loader.

use std::collections::HashSet;
use std::path::Path;

use crate::layout::{LayoutCatalog, MenuLayout};
use crate::loaders::{LoadResult, read_file};

/// Loader for menu layouts from RON files.
pub struct LayoutLoader;

impl LayoutLoader {
    /// Load a layout catalog from a RON file.
    ///
    /// Returns the layouts in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<MenuLayout>> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse a layout catalog from RON text.
    ///
    /// Fails if two layouts share a name.
    pub fn from_str(content: &str) -> LoadResult<Vec<MenuLayout>> {
        let catalog: LayoutCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse menu layout RON: {}", e))?;

        let mut names = HashSet::new();
        for layout in &catalog.menus {
            if !names.insert(layout.name.as_str()) {
                anyhow::bail!("Duplicate menu layout name `{}`", layout.name);
            }
        }

        Ok(catalog.menus)
    }
}

#[cfg(test)]
mod tests {
    use menu_core::Material;
    use tempfile::TempDir;

    use super::*;
    use crate::layout::LayoutPosition;

    const SHOP: &str = r#"(
        menus: [
            (
                name: "shop",
                title: "Shop",
                rows: 3,
                exit_on_click_outside: Some(false),
                items: [
                    (at: Slot(0), text: "Bread"),
                    (
                        at: Grid(x: 4, y: 1),
                        text: "Emerald",
                        icon: (material: "emerald", variant: 2),
                        count: 5,
                        descriptions: ["Shiny", "Costs 5 gold"],
                        action: Some("buy"),
                    ),
                ],
            ),
            (name: "empty", title: "Nothing here", rows: 1),
        ],
    )"#;

    #[test]
    fn test_load_layouts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("menus.ron");
        std::fs::write(&path, SHOP).unwrap();

        let layouts = LayoutLoader::load(&path).unwrap();
        assert_eq!(layouts.len(), 2);

        let shop = &layouts[0];
        assert_eq!(shop.name, "shop");
        assert_eq!(shop.rows, 3);
        assert_eq!(shop.exit_on_click_outside, Some(false));

        let bread = &shop.items[0];
        assert_eq!(bread.at, LayoutPosition::Slot(0));
        assert_eq!(bread.icon.material, Material::PAPER);
        assert_eq!(bread.count, 1);
        assert!(bread.action.is_none());

        let emerald = &shop.items[1];
        assert_eq!(emerald.at, LayoutPosition::Grid { x: 4, y: 1 });
        assert_eq!(emerald.icon.material, Material::new("emerald"));
        assert_eq!(emerald.icon.variant, 2);
        assert_eq!(emerald.count, 5);
        assert_eq!(emerald.descriptions, vec!["Shiny", "Costs 5 gold"]);
        assert_eq!(emerald.action.as_deref(), Some("buy"));

        let empty = &layouts[1];
        assert!(empty.items.is_empty());
        assert_eq!(empty.exit_on_click_outside, None);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let content = r#"(menus: [
            (name: "a", title: "A", rows: 1),
            (name: "a", title: "Again", rows: 2),
        ])"#;

        let err = LayoutLoader::from_str(content).unwrap_err();
        assert!(err.to_string().contains("Duplicate menu layout name `a`"));
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let err = LayoutLoader::from_str("(menus: [(name: \"a\")])").unwrap_err();
        assert!(err.to_string().contains("Failed to parse menu layout RON"));
    }
}
