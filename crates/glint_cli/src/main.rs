use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{
    render, AccumulationBuffer, ImageSink, Integrator, NormalShader, PathTracer, PngWriter,
    PpmWriter, RenderConfig, SkyGradient,
};
use std::path::PathBuf;
use std::time::Instant;

mod scenes;

use scenes::SceneKind;

#[derive(Debug, Parser)]
#[command(author, version, about = "Ray trace a sphere scene to PPM or PNG", long_about = None)]
struct Args {
    /// Width in pixels of the generated image
    #[arg(short = 'W', long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 400)]
    width: u32,

    /// Height in pixels of the generated image
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 300)]
    height: u32,

    /// Samples per pixel when anti-aliasing is on
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 16)]
    samples: u32,

    /// Take a single sample through each pixel
    #[arg(long)]
    no_antialiasing: bool,

    /// Maximum number of bounces along a light path
    #[arg(short = 'd', long, default_value_t = 50)]
    max_depth: u32,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u64).range(1..))]
    threads: Option<u64>,

    /// Seed for a reproducible image
    #[arg(long)]
    seed: Option<u64>,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Balls)]
    scene: SceneKind,

    /// Override the lens aperture (0 = pinhole)
    #[arg(long)]
    aperture: Option<f64>,

    /// Output file; `.png` writes PNG, anything else plain PPM
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let start = Instant::now();
    let demo = args.scene.build().context("failed to build scene")?;
    log::info!(
        "scene {:?} built with {} objects in {:?}",
        args.scene,
        demo.objects.len(),
        start.elapsed()
    );

    let mut camera = demo
        .camera
        .with_aspect(args.width as f64 / args.height as f64);
    if let Some(aperture) = args.aperture {
        camera = camera.with_aperture(aperture);
    }
    let camera = camera.build().context("invalid camera")?;

    let config = RenderConfig {
        antialiasing: !args.no_antialiasing,
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        threads: args.threads.map(|t| t as usize),
        seed: args.seed,
    };

    let integrator: Box<dyn Integrator> = match args.scene {
        SceneKind::Normals => Box::new(NormalShader::new(SkyGradient::default())),
        _ => Box::new(PathTracer::new(SkyGradient::default())),
    };

    let mut buffer = AccumulationBuffer::new(args.width, args.height)?;
    render(&camera, &demo.objects, integrator.as_ref(), &config, &mut buffer)
        .context("render failed")?;

    let mut sink: Box<dyn ImageSink> = match args.output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Box::new(PngWriter::new(&args.output)),
        _ => Box::new(
            PpmWriter::create(&args.output)
                .with_context(|| format!("failed to create {}", args.output.display()))?,
        ),
    };
    buffer
        .serialize(sink.as_mut())
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("saved to {}", args.output.display());
    Ok(())
}
