//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable, SceneError};
use crate::Ray;
use glint_math::{Interval, Vec3, SURFACE_THICKNESS};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Zero, negative and non-finite radii are rejected since they would
    /// produce degenerate normals.
    pub fn new(center: Vec3, radius: f64) -> Result<Self, SceneError> {
        if !center.is_finite() {
            return Err(SceneError::InvalidCenter(center));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        // a*t^2 + 2*b*t + c = 0
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();
        let accept = ray_t.shrink_min(SURFACE_THICKNESS);

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !accept.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !accept.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(root);
        rec.normal = (rec.p - self.center) / self.radius;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(unit_sphere().hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-9); // Should hit at t=0.5
        assert!((rec.normal - Vec3::Z).length() < 1e-9);
        assert!((rec.normal.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(!unit_sphere().hit(&ray, Interval::FORWARD, &mut rec));
    }

    #[test]
    fn test_tangent_ray_is_a_miss() {
        // Grazes the sphere exactly: discriminant is zero
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::FORWARD, &mut rec));
    }

    #[test]
    fn test_far_root_when_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-9);
        // Normal stays outward even from inside
        assert!((rec.normal - Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_no_self_intersection_leaving_surface() {
        let sphere = Sphere::new(Vec3::new(1.0, -2.0, 3.0), 1.5).unwrap();
        let directions = [
            Vec3::X,
            Vec3::new(0.3, 0.9, -0.1),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(0.0, 0.0, -4.0),
        ];

        for dir in directions {
            let unit = dir.normalize();
            let origin = sphere.center() + unit * sphere.radius();
            // Any direction in the outward hemisphere
            let ray = Ray::new(origin, unit + Vec3::new(0.05, -0.02, 0.01));
            let mut rec = HitRecord::default();

            if sphere.hit(&ray, Interval::FORWARD, &mut rec) {
                assert!(rec.t > SURFACE_THICKNESS, "self hit at t={}", rec.t);
            }
        }
    }

    #[test]
    fn test_upper_bound_respected() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!unit_sphere().hit(&ray, Interval::new(0.0, 0.4), &mut rec));
    }

    #[test]
    fn test_invalid_spheres() {
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0),
            Err(SceneError::InvalidRadius(0.0))
        );
        assert!(Sphere::new(Vec3::ZERO, -1.0).is_err());
        assert!(Sphere::new(Vec3::ZERO, f64::INFINITY).is_err());
        assert!(Sphere::new(Vec3::new(f64::NAN, 0.0, 0.0), 1.0).is_err());
    }
}
