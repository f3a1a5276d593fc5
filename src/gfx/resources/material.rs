//! Material presets for Phong shading
//!
//! Materials are plain values: a diffuse colour, a specular colour and a
//! shininess exponent. Draw commands copy these values when a material is
//! selected, so the registry is only consulted while composing a frame.

/// Material ID for referencing materials
pub type MaterialId = String;

/// Phong material definition
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMaterial {
    pub tag: MaterialId,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl Default for ObjectMaterial {
    fn default() -> Self {
        Self {
            tag: "default".to_string(),
            diffuse_color: [0.8, 0.8, 0.8],
            specular_color: [0.0, 0.0, 0.0],
            shininess: 1.0,
        }
    }
}

impl ObjectMaterial {
    /// Creates a new material
    ///
    /// # Arguments
    /// * `tag` - Name draw calls select this material by
    /// * `diffuse` - RGB diffuse colour
    /// * `specular` - RGB specular colour
    /// * `shininess` - Specular exponent
    pub fn new(tag: &str, diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            tag: tag.to_string(),
            diffuse_color: diffuse,
            specular_color: specular,
            shininess,
        }
    }

    /// Builder pattern: Set diffuse colour
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = [r, g, b];
        self
    }

    /// Builder pattern: Set specular colour
    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular_color = [r, g, b];
        self
    }

    /// Builder pattern: Set shininess exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// Ordered, append-only list of materials
///
/// Lookups scan in definition order and return the first match.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: Vec<ObjectMaterial>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a material
    pub fn define(&mut self, material: ObjectMaterial) {
        if self.find(&material.tag).is_some() {
            log::warn!(
                "Material '{}' defined twice; lookups use the first definition",
                material.tag
            );
        }
        self.materials.push(material);
    }

    pub fn find(&self, tag: &str) -> Option<&ObjectMaterial> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectMaterial> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Presets used by the desk scene
pub mod presets {
    use super::ObjectMaterial;

    pub fn metal() -> ObjectMaterial {
        ObjectMaterial::new("metal", [0.8, 0.8, 0.0], [1.0, 1.0, 0.8], 60.0)
    }

    pub fn wooden() -> ObjectMaterial {
        ObjectMaterial::new("wooden", [0.4, 0.2, 0.1], [0.2, 0.2, 0.2], 0.1)
    }

    pub fn glass() -> ObjectMaterial {
        ObjectMaterial::new("glass", [0.2, 0.2, 0.2], [1.0, 1.0, 1.0], 95.0)
    }

    pub fn plate() -> ObjectMaterial {
        ObjectMaterial::new("plate", [0.4, 0.4, 0.4], [0.2, 0.2, 0.2], 30.0)
    }

    pub fn book() -> ObjectMaterial {
        ObjectMaterial::new("book", [0.6, 0.3, 0.1], [0.2, 0.2, 0.2], 10.0)
    }

    pub fn rubber() -> ObjectMaterial {
        ObjectMaterial::new("rubber", [0.7, 0.6, 0.5], [0.02, 0.02, 0.02], 0.001)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_find() {
        let mut registry = MaterialRegistry::new();
        registry.define(presets::wooden());
        registry.define(presets::glass());

        assert_eq!(registry.len(), 2);
        let glass = registry.find("glass").unwrap();
        assert_eq!(glass.shininess, 95.0);
        assert_eq!(glass.specular_color, [1.0, 1.0, 1.0]);
        assert!(registry.find("rubber").is_none());
    }

    #[test]
    fn test_first_definition_wins() {
        let mut registry = MaterialRegistry::new();
        registry.define(presets::plate());
        registry.define(presets::plate().with_shininess(2.0));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("plate").unwrap().shininess, 30.0);
    }

    #[test]
    fn test_builder() {
        let material = ObjectMaterial::default()
            .with_diffuse(0.1, 0.2, 0.3)
            .with_specular(1.0, 1.0, 1.0)
            .with_shininess(8.0);
        assert_eq!(material.diffuse_color, [0.1, 0.2, 0.3]);
        assert_eq!(material.specular_color, [1.0; 3]);
        assert_eq!(material.shininess, 8.0);
    }

    #[test]
    fn test_iteration_keeps_definition_order() {
        let mut registry = MaterialRegistry::new();
        for material in [presets::metal(), presets::book(), presets::rubber()] {
            registry.define(material);
        }
        let tags: Vec<_> = registry.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, ["metal", "book", "rubber"]);
    }
}
