//! Animated Lissajous figure, the companion scene to the n-body stream.
//!
//! Each frame traces `x = sin t`, `y = sin(f t + phase)` over five cycles in
//! green on black; the phase advances a little every frame.

use std::f64::consts::PI;

use rand::Rng;

use super::frame::{Frame, Palette};

pub const SIZE: u32 = 400; // half extent, canvas is 2 * SIZE + 1
pub const RESOLUTION: f64 = 0.001; // parameter step along the curve
pub const CYCLES: f64 = 5.0;
pub const PHASE_STEP: f64 = 0.01;
pub const FRAME_RATE: u32 = 8;

#[derive(Debug, Clone)]
pub struct Lissajous {
    pub freq: f64, // relative frequency of the y oscillator
    pub phase: f64,
    pub size: u32,
}

impl Lissajous {
    /// Random relative frequency in [0, 3) drawn from `rng`
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_freq(rng.random::<f64>() * 3.0)
    }

    pub fn with_freq(freq: f64) -> Self {
        Self {
            freq,
            phase: 0.0,
            size: SIZE,
        }
    }

    /// Draw the current phase, then advance it
    pub fn render(&mut self) -> Frame {
        let extent = 2 * self.size + 1;
        let mut frame = Frame::new(extent, extent, Palette::green_on_black());
        let s = self.size as f64;

        let mut t = 0.0;
        while t < CYCLES * 2.0 * PI {
            let x = t.sin();
            let y = (t * self.freq + self.phase).sin();
            frame.set_index(
                self.size as i64 + (x * s + 0.5) as i64,
                self.size as i64 + (y * s * 0.5) as i64,
                1,
            );
            t += RESOLUTION;
        }

        self.phase += PHASE_STEP;
        frame
    }
}
