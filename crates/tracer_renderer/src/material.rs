//! Surface materials.

use serde::{Deserialize, Serialize};
use tracer_math::Vec3;

/// Color type alias (RGB, unbounded for emission, 0-1 for albedo)
pub type Color = Vec3;

/// How a surface scatters light.
///
/// Only `Diffuse` and `Specular` are traced. `Refractive` is declared so
/// scenes can name it, but like `None` it contributes zero radiance,
/// emission included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    None,
    /// Ideal Lambertian reflector, sampled with a cosine-weighted hemisphere.
    Diffuse,
    /// Perfect mirror.
    Specular,
    /// Glass. Not traced.
    Refractive,
}

impl Material {
    /// Whether the path tracer handles this material.
    pub fn is_traced(self) -> bool {
        matches!(self, Material::Diffuse | Material::Specular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traced_materials() {
        assert!(Material::Diffuse.is_traced());
        assert!(Material::Specular.is_traced());
        assert!(!Material::Refractive.is_traced());
        assert!(!Material::None.is_traced());
    }

    #[test]
    fn test_material_serde_names() {
        let json = serde_json::to_string(&Material::Specular).unwrap();
        assert_eq!(json, "\"specular\"");

        let parsed: Material = serde_json::from_str("\"refractive\"").unwrap();
        assert_eq!(parsed, Material::Refractive);
        assert!(serde_json::from_str::<Material>("\"metal\"").is_err());
    }
}
