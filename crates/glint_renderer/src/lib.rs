//! Glint - CPU ray tracing of analytic sphere scenes.
//!
//! Casts rays from a thin-lens camera, scatters them through Lambertian,
//! metal and glass materials, and accumulates the result into a buffer that
//! scanlines write to in parallel.

mod buffer;
mod camera;
mod hittable;
mod integrator;
mod material;
mod output;
mod renderer;
mod sampling;
mod sphere;

pub use buffer::{clamp_color, AccumulationBuffer, BufferError, RowWriter, MAX_CHANNEL};
pub use camera::{Camera, CameraBuilder, CameraError};
pub use hittable::{HitRecord, Hittable, MaterialId, Object, Objects, ScatterInfo, SceneError};
pub use integrator::{
    trace, Background, Integrator, NormalShader, PathTracer, SkyGradient, SolidBackground,
};
pub use material::{reflect, refract, Material, GLASS_REFLECTANCE};
pub use output::{ImageSink, OutputError, PngWriter, PpmWriter};
pub use renderer::{gamma_scale, render, render_pixel, RenderConfig, RenderError};
pub use sampling::{gen_f64, random_in_unit_disk, random_in_unit_sphere};
pub use sphere::Sphere;

/// Re-export the math vocabulary from glint_math
pub use glint_math::{Color, Interval, Ray, Vec3, VecExt, SURFACE_THICKNESS};
