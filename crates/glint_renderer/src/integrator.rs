//! Radiance evaluation.
//!
//! [`trace`] follows a ray through the scene, scattering at every surface
//! and summing the attenuated contribution of each child path. Glass can
//! split a path in two, so the light paths form a tree; it is walked with
//! an explicit stack instead of native recursion so the call stack stays
//! flat however deep or wide the tree gets.

use crate::{Color, HitRecord, Hittable, Objects, Ray, RenderConfig};
use glint_math::Interval;
use rand::RngCore;

/// What a ray sees when it leaves the scene.
pub trait Background: Send + Sync {
    fn color(&self, ray: &Ray) -> Color;
}

impl<F> Background for F
where
    F: Fn(&Ray) -> Color + Send + Sync,
{
    fn color(&self, ray: &Ray) -> Color {
        self(ray)
    }
}

/// Vertical sky gradient, lightest toward the horizon below and bluest overhead.
#[derive(Debug, Clone, Copy)]
pub struct SkyGradient {
    pub horizon: Color,
    pub zenith: Color,
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

impl Background for SkyGradient {
    fn color(&self, ray: &Ray) -> Color {
        let unit_direction = ray.direction().normalize_or_zero();
        let a = 0.5 * (unit_direction.y + 1.0);
        self.horizon * (1.0 - a) + self.zenith * a
    }
}

/// Constant background color.
#[derive(Debug, Clone, Copy)]
pub struct SolidBackground(pub Color);

impl Background for SolidBackground {
    fn color(&self, _ray: &Ray) -> Color {
        self.0
    }
}

/// Turns a primary ray into a color.
pub trait Integrator: Send + Sync {
    fn radiance(
        &self,
        ray: &Ray,
        scene: &Objects,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> Color;
}

/// Light transport through the scene's materials.
#[derive(Debug, Clone, Default)]
pub struct PathTracer<B> {
    background: B,
}

impl<B: Background> PathTracer<B> {
    pub fn new(background: B) -> Self {
        Self { background }
    }
}

impl<B: Background> Integrator for PathTracer<B> {
    fn radiance(
        &self,
        ray: &Ray,
        scene: &Objects,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> Color {
        trace(ray, scene, &self.background, config.max_depth, rng)
    }
}

/// Debug shading: maps the outward normal at the nearest hit to a color.
#[derive(Debug, Clone, Default)]
pub struct NormalShader<B> {
    background: B,
}

impl<B: Background> NormalShader<B> {
    pub fn new(background: B) -> Self {
        Self { background }
    }
}

impl<B: Background> Integrator for NormalShader<B> {
    fn radiance(
        &self,
        ray: &Ray,
        scene: &Objects,
        _config: &RenderConfig,
        _rng: &mut dyn RngCore,
    ) -> Color {
        let mut rec = HitRecord::default();
        if scene.hit(ray, Interval::FORWARD, &mut rec) {
            0.5 * (rec.normal + Color::ONE)
        } else {
            self.background.color(ray)
        }
    }
}

/// A pending child path: the ray to follow, how many scatters led to it,
/// and the product of attenuations along the way.
struct Frame {
    ray: Ray,
    depth: u32,
    weight: Color,
}

/// Compute the color seen along `ray`.
///
/// Misses return the background at any depth. A hit at `depth >= max_depth`
/// contributes black, so `max_depth` is the number of scatter events a path
/// may take; with `max_depth == 0` only background is ever seen directly.
pub fn trace(
    ray: &Ray,
    scene: &Objects,
    background: &dyn Background,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut color = Color::ZERO;
    let mut rec = HitRecord::default();
    let mut stack = vec![Frame {
        ray: *ray,
        depth: 0,
        weight: Color::ONE,
    }];

    while let Some(Frame { ray, depth, weight }) = stack.pop() {
        if !scene.hit(&ray, Interval::FORWARD, &mut rec) {
            color += weight * background.color(&ray);
            continue;
        }

        if depth >= max_depth {
            continue;
        }

        scene.material(rec.material).scatter(&ray, &mut rec, rng);

        for info in &rec.scatter_infos {
            let weight = weight * info.attenuation;
            // Black children can never add anything
            if weight == Color::ZERO {
                continue;
            }
            stack.push(Frame {
                ray: info.out_ray,
                depth: depth + 1,
                weight,
            });
        }
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_sphere(material: Material) -> Objects {
        let mut scene = Objects::new();
        let mat = scene.add_material(material);
        scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, mat).unwrap();
        scene
    }

    fn toward_sphere() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_sky_gradient() {
        let sky = SkyGradient::default();

        // Ray pointing up should be more blue (less red than white)
        let up_color = sky.color(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down_color = sky.color(&Ray::new(Vec3::ZERO, -Vec3::Y));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);
        assert!((down_color - Color::ONE).length() < 1e-12);
    }

    #[test]
    fn test_zero_depth_hit_is_black() {
        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let mut rng = StdRng::seed_from_u64(1);

        let color = trace(&toward_sphere(), &scene, &SkyGradient::default(), 0, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_zero_depth_miss_is_background() {
        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let sky = SkyGradient::default();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.2));
        assert_eq!(trace(&ray, &scene, &sky, 0, &mut rng), sky.color(&ray));
        assert_eq!(trace(&ray, &scene, &sky, 50, &mut rng), sky.color(&ray));
    }

    #[test]
    fn test_mirror_bounce_attenuates_background() {
        // A mirror facing the camera sends the ray straight back out
        let scene = single_sphere(Material::metal(Color::new(0.5, 0.25, 1.0)));
        let background = SolidBackground(Color::ONE);
        let mut rng = StdRng::seed_from_u64(1);

        let color = trace(&toward_sphere(), &scene, &background, 1, &mut rng);
        assert!((color - Color::new(0.5, 0.25, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_glass_sums_both_branches() {
        // Head-on: refraction passes straight through both walls, the
        // entry reflection heads back to the camera
        let scene = single_sphere(Material::glass(1.5).unwrap());
        let background = SolidBackground(Color::ONE);
        let mut rng = StdRng::seed_from_u64(1);

        let color = trace(&toward_sphere(), &scene, &background, 50, &mut rng);
        assert!((color - Color::splat(1.2)).length() < 1e-9);
    }

    #[test]
    fn test_black_albedo_prunes_children() {
        let scene = single_sphere(Material::lambertian(Color::ZERO));
        let mut rng = StdRng::seed_from_u64(1);

        let color = trace(&toward_sphere(), &scene, &SkyGradient::default(), 50, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_closure_background() {
        let scene = Objects::new();
        let background = |ray: &Ray| Color::splat(ray.direction().x.abs());
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.25, 0.0, 1.0));
        assert_eq!(trace(&ray, &scene, &background, 5, &mut rng), Color::splat(0.25));
    }

    #[test]
    fn test_normal_shader() {
        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let shader = NormalShader::new(SolidBackground(Color::ZERO));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        // Front of the sphere faces +Z
        let color = shader.radiance(&toward_sphere(), &scene, &config, &mut rng);
        assert!((color - Color::new(0.5, 0.5, 1.0)).length() < 1e-9);

        let miss = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(shader.radiance(&miss, &scene, &config, &mut rng), Color::ZERO);
    }
}
