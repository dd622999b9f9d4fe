//! Output side of the pipeline.
//!
//! The core hands every computed difference frame to a [`Renderer`]
//! and looks at nothing it does. Shipping a GUI window is out of
//! scope, so the built-in renderers target the terminal and tests.

use crate::source::Frame;

/// Consumes difference frames for display.
pub trait Renderer {
    /// Displays or otherwise consumes a frame. Side effects only.
    fn display(&mut self, frame: &Frame);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn display(&mut self, frame: &Frame) {
        (**self).display(frame)
    }
}

/// Renderer that discards every frame.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn display(&mut self, _frame: &Frame) {}
}

/// Shade ramp from black to white.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Terminal renderer drawing a downsampled luma view of each frame.
///
/// Each output cell averages a block of pixels and maps the result
/// onto a character ramp. Crude, but enough to watch motion light up
/// against a black background without a windowing stack.
#[derive(Debug)]
pub struct AsciiRenderer {
    /// Output width in character cells.
    columns: u32,
}

impl AsciiRenderer {
    /// Creates a renderer `columns` character cells wide.
    pub fn new(columns: u32) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    fn frame_to_lines(&self, frame: &Frame) -> Vec<String> {
        let columns = self.columns.min(frame.width()).max(1);
        let cell = (frame.width() / columns).max(1);
        // Terminal cells are roughly twice as tall as they are wide.
        let cell_h = cell * 2;

        let mut lines = Vec::new();
        let mut y = 0;
        while y < frame.height() {
            let mut line = String::new();
            let mut x = 0;
            while x < frame.width() {
                let level = block_level(frame, x, y, cell, cell_h);
                let index = (level as usize * (RAMP.len() - 1)) / u8::MAX as usize;
                line.push(RAMP[index] as char);
                x += cell;
            }
            lines.push(line);
            y += cell_h;
        }
        lines
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(80)
    }
}

impl Renderer for AsciiRenderer {
    fn display(&mut self, frame: &Frame) {
        let lines = self.frame_to_lines(frame);
        // ANSI home + clear keeps successive frames in place.
        print!("\x1b[H\x1b[2J");
        for line in lines {
            println!("{line}");
        }
        tracing::debug!(
            sequence = frame.sequence(),
            motion = mean_level(frame),
            "frame rendered"
        );
    }
}

/// Mean luma of a block of pixels, clipped to the frame.
fn block_level(frame: &Frame, x0: u32, y0: u32, w: u32, h: u32) -> u8 {
    let channels = frame.channels() as usize;
    let width = frame.width() as usize;
    let samples = frame.samples();

    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for y in y0..(y0 + h).min(frame.height()) {
        for x in x0..(x0 + w).min(frame.width()) {
            let base = (y as usize * width + x as usize) * channels;
            let pixel: u64 = samples[base..base + channels]
                .iter()
                .map(|&s| s as u64)
                .sum();
            sum += pixel / channels as u64;
            count += 1;
        }
    }
    if count == 0 {
        0
    } else {
        (sum / count) as u8
    }
}

/// Mean sample value across the whole frame.
fn mean_level(frame: &Frame) -> f32 {
    if frame.samples().is_empty() {
        return 0.0;
    }
    let sum: u64 = frame.samples().iter().map(|&s| s as u64).sum();
    sum as f32 / frame.samples().len() as f32
}
