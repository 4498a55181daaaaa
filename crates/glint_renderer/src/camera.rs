//! Thin-lens camera for primary ray generation.

use crate::sampling::random_in_unit_disk;
use crate::Ray;
use glint_math::{DegenerateVectorError, Vec3, VecExt};
use rand::RngCore;
use thiserror::Error;

/// Errors raised when a camera description cannot produce a viewing basis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("look_from and look_at are the same point")]
    CoincidentEye,

    #[error("up vector is parallel to the view direction")]
    DegenerateUp,

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f64),

    #[error("focus distance must be finite and positive, got {0}")]
    InvalidFocusDistance(f64),

    #[error("aperture must be finite and non-negative, got {0}")]
    InvalidAperture(f64),

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspect(f64),

    #[error(transparent)]
    Degenerate(#[from] DegenerateVectorError),
}

/// Camera description, turned into a [`Camera`] by [`CameraBuilder::build`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f64,       // Vertical field of view in degrees
    aperture: f64,   // Lens diameter, 0 = pinhole
    focus_dist: f64, // Distance from camera to plane of perfect focus

    aspect: f64,
}

impl CameraBuilder {
    /// Create a pinhole camera at the origin looking down -Z.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            aspect: 4.0 / 3.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set only the lens diameter, keeping field of view and focus.
    pub fn with_aperture(mut self, aperture: f64) -> Self {
        self.aperture = aperture;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Validate the description and compute the viewing basis.
    pub fn build(&self) -> Result<Camera, CameraError> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFov(self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return Err(CameraError::InvalidAperture(self.aperture));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(CameraError::InvalidAspect(self.aspect));
        }

        let view = self.look_from - self.look_at;
        if view == Vec3::ZERO {
            return Err(CameraError::CoincidentEye);
        }
        let w = view.try_unit()?;
        if w.is_parallel(self.vup) || self.vup == Vec3::ZERO {
            return Err(CameraError::DegenerateUp);
        }
        let u = self.vup.cross(w).try_unit()?;
        let v = w.cross(u);

        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let half_width = self.aspect * half_height;
        let focus = self.focus_dist;

        let origin = self.look_from;
        let lower_left = origin - focus * (half_width * u + half_height * v + w);

        log::debug!(
            "camera at {} looking at {} (vfov {}, aperture {}, focus {})",
            self.look_from,
            self.look_at,
            self.vfov,
            self.aperture,
            self.focus_dist
        );

        Ok(Camera {
            origin,
            lower_left,
            horizontal: 2.0 * focus * half_width * u,
            vertical: 2.0 * focus * half_height * v,
            u,
            v,
            w,
            lens_radius: self.aperture,
        })
    }
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built, so one camera can be shared by every render thread.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Generate a ray through the viewport at screen fractions (s, t).
    ///
    /// `s` runs left to right and `t` bottom to top. With a nonzero lens the
    /// origin is jittered over a disk of radius `lens_radius / 2`, which
    /// blurs everything off the focal plane.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = (self.lens_radius / 2.0) * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.origin + offset;
        let target = self.lower_left + s * self.horizontal + t * self.vertical;
        Ray::new(origin, target - origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal basis (u right, v up, w backwards).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}
