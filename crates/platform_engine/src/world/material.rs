//! Surface materials

use serde::{Deserialize, Serialize};

/// Material tag carried by every obstacle
///
/// Decides which surface effect a ground contact applies; see
/// [`crate::physics::surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Plain ground, no effect
    #[default]
    Normal,
    /// Amplifies horizontal sliding
    Ice,
    /// Sends the player back to spawn
    Lava,
    /// Launches the player upward
    Bounce,
    /// Damps horizontal movement
    Sticky,
}

impl Material {
    /// All materials, in declaration order
    pub const ALL: [Material; 5] = [
        Material::Normal,
        Material::Ice,
        Material::Lava,
        Material::Bounce,
        Material::Sticky,
    ];

    /// Lowercase name as used in world files
    pub fn name(self) -> &'static str {
        match self {
            Material::Normal => "normal",
            Material::Ice => "ice",
            Material::Lava => "lava",
            Material::Bounce => "bounce",
            Material::Sticky => "sticky",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
