//! Vector helpers that glam does not provide.

use crate::Vec3;
use thiserror::Error;

/// Tolerance used for surface offsets and the parallelism test.
///
/// Intersections closer than this to a ray's origin are ignored so a ray
/// leaving a surface does not immediately hit the same surface again.
pub const SURFACE_THICKNESS: f64 = 1e-3;

/// Returned when a vector with zero (or non-finite) length is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("cannot normalize degenerate vector ({x}, {y}, {z})")]
pub struct DegenerateVectorError {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Extra operations on [`Vec3`].
pub trait VecExt {
    /// Normalize, failing instead of producing NaN for a zero-length vector.
    fn try_unit(self) -> Result<Vec3, DegenerateVectorError>;

    /// Returns true if `other` is a scalar multiple of `self`.
    ///
    /// Compares the ratios `other[i] / self[i]` over the axes where `self`
    /// is nonzero. Axes where both vectors are zero are ignored. Opposite
    /// directions count as parallel.
    fn is_parallel(self, other: Vec3) -> bool;
}

impl VecExt for Vec3 {
    fn try_unit(self) -> Result<Vec3, DegenerateVectorError> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(DegenerateVectorError {
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        Ok(self / length)
    }

    fn is_parallel(self, other: Vec3) -> bool {
        let mut ratio: Option<f64> = None;

        for axis in 0..3 {
            let e = self[axis];
            let v = other[axis];

            if e == 0.0 {
                // Nothing to divide by; only consistent if other is also ~0 here
                if v.abs() > SURFACE_THICKNESS {
                    return false;
                }
                continue;
            }

            let r = v / e;
            match ratio {
                None => ratio = Some(r),
                Some(first) if (r - first).abs() > SURFACE_THICKNESS => return false,
                Some(_) => {}
            }
        }

        // A zero vector has no direction to be parallel to
        ratio.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_unit() {
        let v = Vec3::new(3.0, 0.0, 4.0).try_unit().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert_eq!(v, Vec3::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn test_try_unit_zero() {
        let err = Vec3::ZERO.try_unit().unwrap_err();
        assert_eq!(err, DegenerateVectorError { x: 0.0, y: 0.0, z: 0.0 });
        assert!(Vec3::new(f64::NAN, 1.0, 0.0).try_unit().is_err());
    }

    #[test]
    fn test_parallel_same_and_opposite() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        assert!(n.is_parallel(Vec3::new(0.0, 5.0, 0.0)));
        assert!(n.is_parallel(Vec3::new(0.0, -2.0, 0.0)));

        let d = Vec3::new(1.0, 2.0, 3.0);
        assert!(d.is_parallel(d * 2.5));
        assert!(d.is_parallel(-d));
    }

    #[test]
    fn test_not_parallel() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        assert!(!n.is_parallel(Vec3::new(1.0, 1.0, 0.0)));

        let d = Vec3::new(1.0, 2.0, 3.0);
        assert!(!d.is_parallel(Vec3::new(1.0, 2.0, 3.5)));
    }

    #[test]
    fn test_parallel_zero_vector() {
        assert!(!Vec3::ZERO.is_parallel(Vec3::X));
        assert!(!Vec3::ZERO.is_parallel(Vec3::ZERO));
    }
}
