//! Glint math types.
//!
//! Double precision vectors come from glam; everything else here is the
//! small amount of ray tracing vocabulary shared by the renderer.

pub use glam::DVec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{DegenerateVectorError, VecExt, SURFACE_THICKNESS};

/// 3-component vector used for points, directions and colors.
pub type Vec3 = DVec3;

/// Linear RGB color (components nominally in 0-1).
pub type Color = Vec3;
