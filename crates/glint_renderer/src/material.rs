//! Surface materials and how they scatter light.

use crate::hittable::{HitRecord, SceneError, ScatterInfo};
use crate::sampling::random_in_unit_sphere;
use crate::{Color, Ray};
use glint_math::{Vec3, VecExt};
use rand::RngCore;

/// Attenuation of the weak mirror reflection glass adds on entry.
///
/// A fixed split standing in for Fresnel reflectance; tune per material
/// with [`Material::with_reflectance`].
pub const GLASS_REFLECTANCE: f64 = 0.2;

/// Describes how light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Perfect mirror.
    Metal { albedo: Color },
    /// Transparent dielectric.
    Glass {
        /// Index of the medium relative to its surroundings (1.5 = glass in air)
        relative_index: f64,
        /// Weight of the mirror reflection emitted when a ray enters
        reflectance: f64,
    },
}

impl Material {
    /// Create a diffuse material. Albedo is clamped into [0, 1].
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian {
            albedo: albedo.clamp(Color::ZERO, Color::ONE),
        }
    }

    /// Create a mirror material. Albedo is clamped into [0, 1].
    pub fn metal(albedo: Color) -> Self {
        Material::Metal {
            albedo: albedo.clamp(Color::ZERO, Color::ONE),
        }
    }

    /// Create a glass material with the default reflectance split.
    pub fn glass(relative_index: f64) -> Result<Self, SceneError> {
        if !(relative_index.is_finite() && relative_index > 0.0) {
            return Err(SceneError::InvalidRefractiveIndex(relative_index));
        }
        Ok(Material::Glass {
            relative_index,
            reflectance: GLASS_REFLECTANCE,
        })
    }

    /// Override the entry reflectance of a glass material.
    ///
    /// Other materials are returned unchanged.
    pub fn with_reflectance(self, reflectance: f64) -> Self {
        match self {
            Material::Glass { relative_index, .. } => Material::Glass {
                relative_index,
                reflectance: reflectance.clamp(0.0, 1.0),
            },
            other => other,
        }
    }

    /// Scatter an incoming ray at `rec`.
    ///
    /// Replaces `rec.scatter_infos` with the weighted child rays. Every
    /// material produces at least one child; glass produces two when the
    /// ray enters it from outside.
    pub fn scatter(&self, ray_in: &Ray, rec: &mut HitRecord, rng: &mut dyn RngCore) {
        rec.scatter_infos.clear();

        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_in_unit_sphere(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-12 {
                    direction = rec.normal;
                }

                rec.scatter_infos.push(ScatterInfo {
                    attenuation: albedo,
                    out_ray: Ray::scattered(rec.p, direction, ray_in),
                });
            }
            Material::Metal { albedo } => {
                let d = ray_in.direction();
                // Mirror about the side the ray arrived from
                let normal = if d.dot(rec.normal) > 0.0 {
                    -rec.normal
                } else {
                    rec.normal
                };

                rec.scatter_infos.push(ScatterInfo {
                    attenuation: albedo,
                    out_ray: Ray::scattered(rec.p, reflect(d, normal), ray_in),
                });
            }
            Material::Glass {
                relative_index,
                reflectance,
            } => {
                let d = ray_in.direction();
                let entering = d.dot(rec.normal) < 0.0;

                rec.scatter_infos.push(ScatterInfo {
                    attenuation: Color::ONE,
                    out_ray: Ray::refracted(rec.p, refract(d, rec.normal, relative_index)),
                });

                if entering {
                    rec.scatter_infos.push(ScatterInfo {
                        attenuation: Color::splat(reflectance),
                        out_ray: Ray::scattered(rec.p, reflect(d, rec.normal), ray_in),
                    });
                }
            }
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
///
/// `n` must be unit length; `v` may have any length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `incoming` through a surface with outward normal `normal`.
///
/// Rays travelling against the normal enter the medium and use
/// `1 / relative_index`; rays travelling with it leave and use
/// `relative_index`. When Snell's law has no solution the ray is mirrored
/// instead (total internal reflection). Rays along the normal pass straight
/// through.
pub fn refract(incoming: Vec3, normal: Vec3, relative_index: f64) -> Vec3 {
    if normal.is_parallel(incoming) {
        return incoming;
    }

    let unit = incoming.normalize();
    let n = normal.normalize();
    let (n, eta) = if unit.dot(n) < 0.0 {
        (n, 1.0 / relative_index)
    } else {
        (-n, relative_index)
    };

    let cos_i = -unit.dot(n);
    let sin_t = eta * (1.0 - cos_i * cos_i).max(0.0).sqrt();
    if sin_t > 1.0 {
        return reflect(incoming, n);
    }

    let r_out_perp = eta * (unit + cos_i * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    r_out_perp + r_out_parallel
}
