//! Accumulation buffer shared by the render threads.
//!
//! Each scanline is handed out as a [`RowWriter`] owning a disjoint `&mut`
//! slice of the pixels, so cell writes need no locking. The only state the
//! threads share is the atomic count of finished pixels used for progress.

use crate::output::{ImageSink, OutputError};
use crate::Color;
use glint_math::Interval;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Largest value a stored channel may take.
pub const MAX_CHANNEL: f64 = 255.99;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BufferError {
    #[error("image dimensions must be nonzero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Scale a color down so its largest channel is at most [`MAX_CHANNEL`].
///
/// All three channels are scaled by the same factor so the hue survives.
pub fn clamp_color(color: Color) -> Color {
    let max = color.max_element();
    if max > MAX_CHANNEL {
        color * (MAX_CHANNEL / max)
    } else {
        color
    }
}

/// Per-pixel color buffer with progress tracking.
#[derive(Debug)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    completed: AtomicUsize,
}

impl AccumulationBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::EmptyImage { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
            completed: AtomicUsize::new(0),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// All pixels, row-major from the top row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of pixels written so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Fraction of pixels written, in [0, 1].
    pub fn progress(&self) -> f64 {
        self.completed() as f64 / self.pixels.len() as f64
    }

    /// Split the buffer into one writer per scanline, in parallel.
    ///
    /// Starts a new pass: the completed count is reset to zero.
    pub fn rows_mut(&mut self) -> impl IndexedParallelIterator<Item = RowWriter<'_>> + '_ {
        *self.completed.get_mut() = 0;

        let width = self.width as usize;
        let total = self.pixels.len();
        let completed = &self.completed;

        self.pixels
            .par_chunks_mut(width)
            .enumerate()
            .map(move |(row, pixels)| RowWriter {
                row: row as u32,
                pixels,
                completed,
                total,
            })
    }

    /// Convert to 8-bit RGB, row-major from the top row.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        let channel = Interval::new(0.0, 255.0);
        self.pixels
            .iter()
            .map(|c| {
                [
                    channel.clamp(c.x) as u8,
                    channel.clamp(c.y) as u8,
                    channel.clamp(c.z) as u8,
                ]
            })
            .collect()
    }

    /// Hand the finished image to `sink`. Consumes the buffer.
    pub fn serialize(self, sink: &mut dyn ImageSink) -> Result<(), OutputError> {
        if self.completed() != self.pixels.len() {
            log::warn!(
                "serializing a partial image: {} of {} pixels written",
                self.completed(),
                self.pixels.len()
            );
        }
        sink.write_image(self.width, self.height, &self.to_rgb8())
    }
}

/// Exclusive access to one scanline of an [`AccumulationBuffer`].
pub struct RowWriter<'a> {
    row: u32,
    pixels: &'a mut [Color],
    completed: &'a AtomicUsize,
    total: usize,
}

impl RowWriter<'_> {
    /// Index of this row, 0 being the top.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Write every pixel of the row once, left to right.
    ///
    /// `shade` receives the column and returns the color to store; it is
    /// clamped with [`clamp_color`] before being written.
    pub fn fill(self, mut shade: impl FnMut(u32) -> Color) {
        for (x, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = clamp_color(shade(x as u32));

            let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
            // Log whenever this write crosses a 10% boundary
            if done * 10 / self.total != (done - 1) * 10 / self.total {
                log::info!("render {}% complete", done * 100 / self.total);
            }
        }
    }
}
