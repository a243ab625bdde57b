//! Turn particle snapshots into palette-indexed frames
//!
//! Two modes:
//! - plain: green disks on black for the current positions
//! - fade:  the last `k` snapshots ("generations") in gray levels, newest brightest
//!
//! The optional overlay prints acceleration, velocity and position of a
//! two-particle system as text. It reads the snapshot only and never feeds
//! back into the simulation.

use std::collections::VecDeque;

use super::draw::{draw_disk, draw_label, world_to_pixel};
use super::frame::{Frame, Palette};
use crate::configuration::config::{RenderConfig, RenderMode};
use crate::simulation::states::{NVec2, ParticleSystem};

/// One tick's positions kept around for trail rendering
#[derive(Debug, Clone)]
pub struct Generation {
    pub tick: u64, // tick the snapshot was taken at
    pub positions: Vec<NVec2>,
    pub countdown: u8, // frames left, also the palette index it is drawn with
}

pub struct FrameRenderer {
    size: u32, // world-to-pixel extent
    canvas: u32, // frame width and height
    radius: i32,
    mode: RenderMode,
    overlay: bool,
    generations: u8, // full countdown for new trail entries
    history: VecDeque<Generation>,
}

impl FrameRenderer {
    pub fn new(cfg: &RenderConfig, mode: RenderMode, overlay: bool) -> Self {
        Self {
            size: cfg.size,
            canvas: cfg.canvas_extent(),
            radius: cfg.draw_radius,
            mode,
            overlay,
            generations: cfg.fade_generations.max(1),
            history: VecDeque::with_capacity(cfg.fade_generations as usize + 1),
        }
    }

    fn palette(&self) -> Palette {
        match self.mode {
            RenderMode::Plain => Palette::green_on_black(),
            RenderMode::Fade => Palette::gray_fade(self.generations),
        }
    }

    /// Render the current snapshot. In fade mode this also ages the history
    /// by one frame, so call it exactly once per frame.
    pub fn render(&mut self, sys: &ParticleSystem) -> Frame {
        let mut frame = Frame::new(self.canvas, self.canvas, self.palette());
        let top = (frame.palette().len() - 1) as u8;

        match self.mode {
            RenderMode::Plain => {
                for p in &sys.particles {
                    let (cx, cy) = world_to_pixel(&p.x, self.size);
                    draw_disk(&mut frame, cx, cy, self.radius, top);
                }
            }
            RenderMode::Fade => {
                self.age();
                self.history.push_back(Generation {
                    tick: sys.tick,
                    positions: sys.particles.iter().map(|p| p.x).collect(),
                    countdown: self.generations,
                });

                // oldest first so newer snapshots paint over fading ones
                for g in &self.history {
                    for x in &g.positions {
                        let (cx, cy) = world_to_pixel(x, self.size);
                        draw_disk(&mut frame, cx, cy, self.radius, g.countdown);
                    }
                }
            }
        }

        if self.overlay && sys.len() == 2 {
            draw_overlay(&mut frame, sys, top);
        }

        frame
    }

    /// Count every generation down by one and drop the oldest one if it ran out
    fn age(&mut self) {
        for g in self.history.iter_mut() {
            g.countdown = g.countdown.saturating_sub(1);
        }
        if self.history.front().is_some_and(|g| g.countdown == 0) {
            self.history.pop_front();
        }
    }

    /// Live trail generations, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Generation> {
        self.history.iter()
    }
}

fn draw_overlay(frame: &mut Frame, sys: &ParticleSystem, index: u8) {
    let (a, b) = (&sys.particles[0], &sys.particles[1]);

    let accelerations = format!(
        "accelerations {:.6}::{:.6}   {:.6}::{:.6}",
        a.a.x, a.a.y, b.a.x, b.a.y
    );
    let velocities = format!(
        "velocities {:.6}::{:.6}   {:.6}::{:.6}",
        a.v.x, a.v.y, b.v.x, b.v.y
    );
    let positions = format!(
        "positions {:.6}::{:.6}   {:.6}::{:.6}   separation {:.6}",
        a.x.x, a.x.y, b.x.x, b.x.y,
        a.distance_squared(b).sqrt()
    );

    draw_label(frame, 0, 50, &accelerations, index);
    draw_label(frame, 0, 75, &velocities, index);
    draw_label(frame, 0, 100, &positions, index);
}
