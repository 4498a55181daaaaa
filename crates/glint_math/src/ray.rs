use crate::Vec3;

/// A ray in 3D space with origin and direction.
///
/// Rays represent a half-line starting at `origin` and traveling in
/// `direction` (not necessarily normalized). The `refracted` flag records
/// whether an earlier segment of the same light path crossed a dielectric
/// boundary; child rays inherit it from their parent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub refracted: bool,
}

impl Ray {
    /// Create a new ray that has not passed through any dielectric.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            refracted: false,
        }
    }

    /// Create a ray spawned from `parent`, carrying its refracted flag.
    pub fn scattered(origin: Vec3, direction: Vec3, parent: &Ray) -> Self {
        Self {
            origin,
            direction,
            refracted: parent.refracted,
        }
    }

    /// Create a ray that has just been transmitted through a dielectric.
    pub fn refracted(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            refracted: true,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert!(!ray.refracted);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_refracted_flag_propagates() {
        let through_glass = Ray::refracted(Vec3::ZERO, Vec3::Z);
        let child = Ray::scattered(Vec3::ONE, Vec3::Y, &through_glass);
        assert!(child.refracted);

        let plain = Ray::new(Vec3::ZERO, Vec3::Z);
        let child = Ray::scattered(Vec3::ONE, Vec3::Y, &plain);
        assert!(!child.refracted);
    }
}
