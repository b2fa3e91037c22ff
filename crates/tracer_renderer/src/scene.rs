//! Scene objects and the nearest-hit query.

use crate::{
    hittable::Hittable,
    material::{Color, Material},
    sphere::Sphere,
};
use tracer_math::{Ray, Vec3};

/// A shape together with its surface properties.
pub struct SceneObject {
    /// Label for logging
    pub name: String,
    /// Geometry used for intersection and normals
    pub shape: Box<dyn Hittable>,
    /// Radiance emitted regardless of incoming light
    pub emission: Color,
    /// Per-channel reflectance (albedo)
    pub color: Color,
    /// How the surface scatters light
    pub material: Material,
}

impl SceneObject {
    /// Create a new scene object from any shape.
    pub fn new(
        name: impl Into<String>,
        shape: impl Hittable + 'static,
        emission: Color,
        color: Color,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            shape: Box::new(shape),
            emission,
            color,
            material,
        }
    }

    /// Convenience constructor for a sphere.
    pub fn sphere(
        name: impl Into<String>,
        center: Vec3,
        radius: f32,
        emission: Color,
        color: Color,
        material: Material,
    ) -> Self {
        Self::new(name, Sphere::new(center, radius), emission, color, material)
    }

    /// Reference position of the object's shape.
    pub fn position(&self) -> Vec3 {
        self.shape.position()
    }
}

impl std::fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("name", &self.name)
            .field("position", &self.position())
            .field("emission", &self.emission)
            .field("color", &self.color)
            .field("material", &self.material)
            .finish()
    }
}

/// Result of a scene intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Distance along the ray to the hit
    pub distance: f32,
    /// Index of the object that was hit
    pub index: usize,
}

/// An ordered, fixed list of objects.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from a list of objects.
    pub fn from_objects(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    /// The built-in demo scene: six colored spheres on a huge floor sphere,
    /// lit by one large emissive sphere.
    pub fn default_scene() -> Self {
        let black = Color::ZERO;
        Self::from_objects(vec![
            SceneObject::sphere(
                "Mirror",
                Vec3::new(-2.0, 4.0, -8.0),
                10.0,
                black,
                Color::ONE,
                Material::Specular,
            ),
            SceneObject::sphere(
                "Blue",
                Vec3::new(-9.0, -3.0, 3.0),
                4.0,
                black,
                Color::new(1.0, 0.05, 0.05),
                Material::Diffuse,
            ),
            SceneObject::sphere(
                "Bottom",
                Vec3::new(0.0, -205.0, 0.0),
                201.0,
                black,
                Color::splat(0.98),
                Material::Diffuse,
            ),
            SceneObject::sphere(
                "Red",
                Vec3::new(10.0, 10.0, 4.0),
                7.0,
                black,
                Color::new(0.0, 1.0, 0.0),
                Material::Diffuse,
            ),
            SceneObject::sphere(
                "Green",
                Vec3::new(2.0, -15.0, 7.0),
                12.0,
                black,
                Color::new(0.8, 1.0, 0.8),
                Material::Specular,
            ),
            SceneObject::sphere(
                "Yellow",
                Vec3::new(8.0, -1.0, -1.0),
                3.6,
                black,
                Color::new(1.0, 1.0, 0.0),
                Material::Diffuse,
            ),
            SceneObject::sphere(
                "Sun",
                Vec3::new(-60.0, 40.0, 20.0),
                40.0,
                Color::new(2.0, 2.0, 1.8),
                Color::new(1.0, 1.0, 0.9),
                Material::Diffuse,
            ),
        ])
    }

    /// Get the object at `index`.
    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// All objects, in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find the nearest object hit by `ray`.
    ///
    /// Linear scan over every object. On equal distances the earlier object
    /// wins.
    pub fn intersect(&self, ray: &Ray) -> Option<SceneHit> {
        let mut nearest: Option<SceneHit> = None;

        for (index, object) in self.objects.iter().enumerate() {
            let Some(distance) = object.shape.intersect(ray) else {
                continue;
            };
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(SceneHit { distance, index });
            }
        }

        nearest
    }
}
