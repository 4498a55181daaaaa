//! Hittable trait, HitRecord and the Objects scene graph.

use crate::{Color, Material, Ray, Sphere};
use glint_math::{Interval, Vec3};
use thiserror::Error;

/// Errors raised while building a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    #[error("sphere center must be finite, got {0}")]
    InvalidCenter(Vec3),

    #[error("relative refractive index must be finite and positive, got {0}")]
    InvalidRefractiveIndex(f64),

    #[error("material {0:?} is not registered in this scene")]
    UnknownMaterial(MaterialId),
}

/// Index of a material in an [`Objects`] arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// One weighted child path produced by a scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterInfo {
    /// Per-channel weight applied to the child's radiance
    pub attenuation: Color,
    /// Outgoing ray
    pub out_ray: Ray,
}

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Default)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Material bound to the object that was hit
    pub material: MaterialId,
    /// Child paths, filled in by [`Material::scatter`]
    pub scatter_infos: Vec<ScatterInfo>,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the geometric part of the record.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;
}

/// A surface bound to a material of the owning scene.
#[derive(Debug, Clone)]
pub struct Object {
    pub sphere: Sphere,
    pub material: MaterialId,
}

/// Ordered collection of objects plus the materials they share.
///
/// Materials live in a flat arena and objects refer to them by
/// [`MaterialId`], so one material can be bound to any number of spheres.
#[derive(Debug, Clone, Default)]
pub struct Objects {
    objects: Vec<Object>,
    materials: Vec<Material>,
}

impl Objects {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add a surface bound to an already registered material.
    pub fn add(&mut self, sphere: Sphere, material: MaterialId) -> Result<(), SceneError> {
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material));
        }
        self.objects.push(Object { sphere, material });
        Ok(())
    }

    /// Validate and add a sphere in one step.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f64,
        material: MaterialId,
    ) -> Result<(), SceneError> {
        self.add(Sphere::new(center, radius)?, material)
    }

    /// Look up a material.
    ///
    /// `add` refuses ids past the end of this scene's material list, so
    /// every id stored in a hit record indexes a material. An id taken from
    /// another scene is not detected and resolves to whichever material
    /// sits at that index here.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Objects {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.sphere.hit(ray, interval, rec) {
                hit_anything = true;
                closest_so_far = rec.t;
                rec.material = object.material;
            }
        }

        hit_anything
    }
}
