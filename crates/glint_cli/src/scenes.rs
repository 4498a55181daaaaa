//! Built-in demo scenes.

use clap::ValueEnum;
use glint_renderer::{CameraBuilder, Color, Material, Objects, SceneError, Vec3};

/// Scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Diffuse ball resting on a huge ground sphere
    Balls,
    /// The balls scene shaded by surface normal
    Normals,
    /// Diffuse, metal and glass balls with depth of field
    Materials,
    /// No objects, just the sky gradient
    Sky,
}

/// Objects plus a camera description that frames them.
pub struct Demo {
    pub objects: Objects,
    pub camera: CameraBuilder,
}

impl SceneKind {
    pub fn build(self) -> Result<Demo, SceneError> {
        match self {
            SceneKind::Balls | SceneKind::Normals => balls(),
            SceneKind::Materials => materials(),
            SceneKind::Sky => Ok(Demo {
                objects: Objects::new(),
                camera: CameraBuilder::new(),
            }),
        }
    }
}

fn balls() -> Result<Demo, SceneError> {
    let mut objects = Objects::new();
    let grey = objects.add_material(Material::lambertian(Color::splat(0.5)));

    objects.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, grey)?;
    objects.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, grey)?;

    Ok(Demo {
        objects,
        camera: CameraBuilder::new(),
    })
}

fn materials() -> Result<Demo, SceneError> {
    let mut objects = Objects::new();
    let ground = objects.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let matte = objects.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = objects.add_material(Material::glass(1.5)?);
    let gold = objects.add_material(Material::metal(Color::new(0.8, 0.6, 0.2)));

    objects.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;
    objects.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, matte)?;
    objects.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?;
    objects.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?;

    let look_from = Vec3::new(-2.0, 1.0, 1.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = CameraBuilder::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(35.0, 0.1, (look_from - look_at).length());

    Ok(Demo { objects, camera })
}
