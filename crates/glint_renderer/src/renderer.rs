//! Render driver.
//!
//! Implements:
//! - Polar-jittered multi-sampling for anti-aliasing
//! - Gamma correction (gamma = 2)
//! - Scanline-parallel rendering into an [`AccumulationBuffer`]

use crate::buffer::{AccumulationBuffer, MAX_CHANNEL};
use crate::sampling::gen_f64;
use crate::{Camera, Color, Integrator, Objects};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::f64::consts::TAU;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("anti-aliasing needs at least one sample per pixel")]
    NoSamples,

    #[error("thread pool must have at least one thread")]
    NoThreads,

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Jitter several samples per pixel; off takes one sample at the pixel corner
    pub antialiasing: bool,
    /// Samples per pixel when anti-aliasing is on
    pub samples_per_pixel: u32,
    /// Maximum number of scatter events along a path
    pub max_depth: u32,
    /// Size of a dedicated thread pool; None uses rayon's global pool
    pub threads: Option<usize>,
    /// Seed for reproducible renders; None draws from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialiasing: true,
            samples_per_pixel: 100,
            max_depth: 50,
            threads: None,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Number of samples actually taken per pixel.
    pub fn samples(&self) -> u32 {
        if self.antialiasing {
            self.samples_per_pixel
        } else {
            1
        }
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.samples() == 0 {
            return Err(RenderError::NoSamples);
        }
        if self.threads == Some(0) {
            return Err(RenderError::NoThreads);
        }
        if self.antialiasing && self.samples_per_pixel == 1 {
            log::warn!("anti-aliasing enabled with a single sample per pixel");
        }
        Ok(())
    }
}

/// Gamma-correct a linear color and scale it to the 0-255.99 range.
#[inline]
pub fn gamma_scale(linear: Color) -> Color {
    let gamma = linear.max(Color::ZERO);
    Color::new(gamma.x.sqrt(), gamma.y.sqrt(), gamma.z.sqrt()) * MAX_CHANNEL
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are buffer coordinates with `y = 0` at the top of the image
/// and must lie inside the `width x height` image. Returns the mean of the gamma-corrected, scaled samples (not yet
/// clamped).
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    camera: &Camera,
    scene: &Objects,
    integrator: &dyn Integrator,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(x < width && y < height, "pixel ({x}, {y}) outside image");

    let i = x as f64;
    // Screen space t runs bottom to top
    let j = (height - 1 - y) as f64;
    let (w, h) = (width as f64, height as f64);

    if !config.antialiasing {
        let ray = camera.get_ray(i / w, j / h, rng);
        return gamma_scale(integrator.radiance(&ray, scene, config, rng));
    }

    let n = config.samples_per_pixel;
    let mut pixel_color = Color::ZERO;

    for k in 0..n {
        // Spread samples around the pixel at evenly stepped angles
        let angle = TAU * (k as f64 + gen_f64(rng)) / n as f64;
        let radius = gen_f64(rng);
        let s = (i + radius * angle.cos()) / w;
        let t = (j + radius * angle.sin()) / h;

        let ray = camera.get_ray(s, t, rng);
        pixel_color += gamma_scale(integrator.radiance(&ray, scene, config, rng));
    }

    // Average the samples
    pixel_color / n as f64
}

/// Per-row generator so seeded renders do not depend on scheduling.
fn row_rng(seed: Option<u64>, row: u32) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_entropy(),
    }
}

/// Render the entire scene into `buffer`.
///
/// Scanlines are distributed over a thread pool; the call blocks until
/// every pixel has been written exactly once.
pub fn render(
    camera: &Camera,
    scene: &Objects,
    integrator: &dyn Integrator,
    config: &RenderConfig,
    buffer: &mut AccumulationBuffer,
) -> Result<(), RenderError> {
    config.validate()?;

    let (width, height) = (buffer.width(), buffer.height());
    log::info!(
        "rendering {}x{} @ {} spp, max depth {}, {} objects",
        width,
        height,
        config.samples(),
        config.max_depth,
        scene.len()
    );

    let start = Instant::now();
    let work = |buffer: &mut AccumulationBuffer| {
        buffer.rows_mut().for_each(|row| {
            let y = row.row();
            let mut rng = row_rng(config.seed, y);
            row.fill(|x| {
                render_pixel(
                    camera, scene, integrator, x, y, width, height, config, &mut rng,
                )
            });
        });
    };

    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            pool.install(|| work(&mut *buffer));
        }
        None => work(&mut *buffer),
    }

    log::info!(
        "rendered {} pixels in {:?}",
        buffer.completed(),
        start.elapsed()
    );

    Ok(())
}
