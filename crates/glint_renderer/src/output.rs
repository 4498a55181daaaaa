//! Image sinks for finished renders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("expected {expected} pixels for the image size, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Receives a finished image, row-major from the top row.
pub trait ImageSink {
    fn write_image(&mut self, width: u32, height: u32, pixels: &[[u8; 3]])
        -> Result<(), OutputError>;
}

fn check_len(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<(), OutputError> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(OutputError::DimensionMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Writes plain-text PPM (P3).
pub struct PpmWriter<W: Write> {
    writer: W,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PpmWriter<BufWriter<File>> {
    /// Create (or truncate) a PPM file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ImageSink for PpmWriter<W> {
    fn write_image(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[[u8; 3]],
    ) -> Result<(), OutputError> {
        check_len(width, height, pixels)?;

        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "255")?;
        for [r, g, b] in pixels {
            writeln!(self.writer, "{} {} {}", r, g, b)?;
        }
        self.writer.flush()?;

        Ok(())
    }
}

/// Writes a PNG file through the `image` crate.
pub struct PngWriter {
    path: PathBuf,
}

impl PngWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSink for PngWriter {
    fn write_image(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[[u8; 3]],
    ) -> Result<(), OutputError> {
        check_len(width, height, pixels)?;

        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        image::save_buffer_with_format(
            &self.path,
            &raw,
            width,
            height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )?;

        Ok(())
    }
}
