//! Host-displayable item stacks and the icons menu items render with.

use std::borrow::Cow;

/// Host material name, e.g. `"paper"` or `"emerald"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Material(Cow<'static, str>);

impl Material {
    /// The empty-slot material.
    pub const AIR: Material = Material(Cow::Borrowed("air"));
    /// Default icon for menu items.
    pub const PAPER: Material = Material(Cow::Borrowed("paper"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_air(&self) -> bool {
        self.0 == "air"
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::PAPER
    }
}

/// Material plus the host's per-material variant value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    pub material: Material,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: u8,
}

impl Icon {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            variant: 0,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: u8) -> Self {
        self.variant = variant;
        self
    }
}

impl From<Material> for Icon {
    fn from(material: Material) -> Self {
        Self::new(material)
    }
}

/// What the host draws in a single slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub icon: Icon,
    pub amount: u8,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
}

impl ItemStack {
    pub fn new(icon: Icon, amount: u8) -> Self {
        Self {
            icon,
            amount,
            display_name: None,
            lore: Vec::new(),
        }
    }

    /// An air stack, which the host treats as an empty slot.
    pub fn empty() -> Self {
        Self::new(Icon::new(Material::AIR), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.icon.material.is_air() || self.amount == 0
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}
