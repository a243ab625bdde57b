//! Configuration types for simulation scenarios.
//!
//! All physical constants are fixed at build time through the defaults and
//! presets below; a YAML file with the same shape may override any of them.
//!
//! - [`EngineConfig`]     – force law, integrator, render mode, encoding
//! - [`ParametersConfig`] – physical constants and the particle count
//! - [`BodyConfig`]       – optional explicit initial state per particle
//! - [`RenderConfig`]     – canvas, disk radius, fade depth
//! - [`EncoderConfig`]    – external video encoder invocation
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "leapfrog"     # or "symplectic_euler"
//!   force_law: "softened"      # or "inverse_square"
//!   render_mode: "fade"        # or "plain"
//!   overlay: false
//!   encoding: "png"            # or "jpeg"
//!
//! parameters:
//!   G: 1.0
//!   mass: 1.0e7
//!   epoch: 2.0e-3
//!   count: 3
//!   softening: 1.0e6
//!   spread: 133.3
//!   seed: 42
//!
//! bodies:                      # optional, overrides count and spread
//!   - x: [ -100.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!   - x: [ 100.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!
//! render:
//!   size: 800
//!   draw_radius: 8
//!   fade_generations: 8
//!   inclusive_edge: true
//!   jpeg_quality: 85
//!
//! encoder:
//!   program: "ffmpeg"
//!   frame_rate: 24
//!   format: "ogg"
//!   quality: 10
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::simulation::integrator::IntegratorKind;

pub const SIZE: u32 = 800;
/// Largest accepted canvas extent in pixels
pub const MAX_SIZE: u32 = 16_384;
pub const DRAW_RADIUS: i32 = 8;
pub const FADE_GENERATIONS: u8 = 8;
pub const G: f64 = 1.0;
pub const MASS: f64 = 1.0e7;
/// Leapfrog and Euler kick with `F / m`, so a step of `1e-5` barely moves
/// `1e7`-mass particles; `2e-3` gives visible motion at 24 fps
pub const EPOCH: f64 = 2.0e-3;
pub const COUNT: usize = 3;
pub const SOFTENING: f64 = 1.0e6;
pub const FRAME_RATE: u32 = 24;

/// Which pairwise force law drives the system
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceLawConfig {
    #[serde(rename = "softened")] // G m m r / (|r|^3 + softening)
    #[default]
    Softened,

    #[serde(rename = "inverse_square")] // G m m / |r|^2, no softening
    InverseSquare,
}

/// How particles are drawn
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[serde(rename = "plain")] // current positions only
    #[default]
    Plain,

    #[serde(rename = "fade")] // current positions over fading trails
    Fade,
}

/// Image container written for every frame
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[serde(rename = "png")]
    #[default]
    Png,

    #[serde(rename = "jpeg")]
    Jpeg,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegratorKind,
    pub force_law: ForceLawConfig,
    pub render_mode: RenderMode,
    pub overlay: bool, // debug text, only drawn for exactly two particles
    pub encoding: Encoding,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub mass: f64, // identical for every particle
    pub epoch: f64, // fixed time step
    pub count: usize, // number of randomly placed particles
    pub softening: f64, // added to |r|^3 by the softened law
    pub spread: f64, // std-dev of the initial position distribution
    pub seed: Option<u64>, // None draws a fresh seed per run
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G,
            mass: MASS,
            epoch: EPOCH,
            count: COUNT,
            softening: SOFTENING,
            spread: SIZE as f64 / 6.0,
            seed: None,
        }
    }
}

/// Explicit initial state for one particle
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // position, world units centred on the canvas
    #[serde(default)]
    pub v: [f64; 2], // velocity
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderConfig {
    pub size: u32, // canvas extent in pixels
    pub draw_radius: i32, // particle disk radius in pixels
    pub fade_generations: u8, // frames a trail snapshot stays visible
    pub inclusive_edge: bool, // canvas is (size+1)^2 instead of size^2
    pub jpeg_quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: SIZE,
            draw_radius: DRAW_RADIUS,
            fade_generations: FADE_GENERATIONS,
            inclusive_edge: true,
            jpeg_quality: 85,
        }
    }
}

impl RenderConfig {
    /// Width and height of the canvas in pixels
    pub fn canvas_extent(&self) -> u32 {
        if self.inclusive_edge {
            self.size + 1
        } else {
            self.size
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EncoderConfig {
    pub program: String,
    pub frame_rate: u32,
    pub format: String, // output container handed to the encoder
    pub quality: u32, // -qscale:v
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            frame_rate: FRAME_RATE,
            format: "ogg".to_string(),
            quality: 10,
        }
    }
}

impl EncoderConfig {
    /// Argument list: image sequence on stdin, encoded video on stdout
    pub fn args(&self) -> Vec<String> {
        vec![
            "-f".into(), "image2pipe".into(),
            "-pix_fmt".into(), "yuv420p".into(),
            "-r".into(), self.frame_rate.to_string(),
            "-i".into(), "-".into(),
            "-f".into(), self.format.clone(),
            "-qscale:v".into(), self.quality.to_string(),
            "-f".into(), self.format.clone(),
            "-".into(),
        ]
    }
}

/// Top-level scenario configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>, // empty -> `parameters.count` random particles
    pub render: RenderConfig,
    pub encoder: EncoderConfig,
}

impl ScenarioConfig {
    /// Three equal masses, softened gravity, leapfrog, plain green-on-black render
    pub fn three_body() -> Self {
        Self::default()
    }

    /// Two particles at rest at (±100, 0), unsoftened gravity, symplectic
    /// Euler, with the debug text overlay
    pub fn two_body() -> Self {
        let mut cfg = Self::default();
        cfg.engine.integrator = IntegratorKind::SymplecticEuler;
        cfg.engine.force_law = ForceLawConfig::InverseSquare;
        cfg.engine.overlay = true;
        cfg.parameters.count = 2;
        cfg.bodies = vec![
            BodyConfig { x: [-100.0, 0.0], v: [0.0, 0.0] },
            BodyConfig { x: [100.0, 0.0], v: [0.0, 0.0] },
        ];
        cfg
    }

    /// Three particles drawn over eight generations of fading trails
    pub fn trails() -> Self {
        let mut cfg = Self::default();
        cfg.engine.render_mode = RenderMode::Fade;
        cfg
    }

    /// Load a scenario from a YAML file; missing fields keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Number of particles this scenario will create
    pub fn particle_count(&self) -> usize {
        if self.bodies.is_empty() {
            self.parameters.count
        } else {
            self.bodies.len()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.parameters;
        let r = &self.render;

        if self.particle_count() == 0 {
            return Err(Error::InvalidConfig("at least one particle is required".into()));
        }
        if !p.mass.is_finite() || p.mass <= 0.0 {
            return Err(Error::InvalidConfig("mass must be finite and > 0".into()));
        }
        if !p.epoch.is_finite() || p.epoch <= 0.0 {
            return Err(Error::InvalidConfig("epoch must be finite and > 0".into()));
        }
        if !p.G.is_finite() {
            return Err(Error::InvalidConfig("G must be finite".into()));
        }
        if !p.softening.is_finite() || p.softening < 0.0 {
            return Err(Error::InvalidConfig("softening must be finite and >= 0".into()));
        }
        if !p.spread.is_finite() || p.spread < 0.0 {
            return Err(Error::InvalidConfig("spread must be finite and >= 0".into()));
        }
        if self.bodies.iter().any(|b| !b.x.iter().chain(b.v.iter()).all(|c| c.is_finite())) {
            return Err(Error::InvalidConfig("body positions and velocities must be finite".into()));
        }
        if r.size == 0 || r.size > MAX_SIZE {
            return Err(Error::InvalidConfig(format!("render size must be in 1..={MAX_SIZE}")));
        }
        if r.draw_radius <= 0 {
            return Err(Error::InvalidConfig("draw_radius must be > 0".into()));
        }
        if r.fade_generations == 0 || r.fade_generations == u8::MAX {
            // palette holds the background plus one entry per generation
            return Err(Error::InvalidConfig("fade_generations must be in 1..=254".into()));
        }
        if r.jpeg_quality == 0 || r.jpeg_quality > 100 {
            return Err(Error::InvalidConfig("jpeg_quality must be in 1..=100".into()));
        }
        if self.encoder.frame_rate == 0 {
            return Err(Error::InvalidConfig("frame_rate must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for cfg in [ScenarioConfig::three_body(), ScenarioConfig::two_body(), ScenarioConfig::trails()] {
            cfg.validate().unwrap();
        }
        assert_eq!(ScenarioConfig::three_body().particle_count(), 3);
        assert_eq!(ScenarioConfig::two_body().particle_count(), 2);
    }

    #[test]
    fn yaml_overrides_keep_defaults() {
        let cfg = ScenarioConfig::from_yaml_str(
            r#"
engine:
  integrator: "symplectic_euler"
  force_law: "inverse_square"
parameters:
  count: 2
  seed: 7
render:
  size: 200
"#,
        )
        .unwrap();

        assert_eq!(cfg.engine.integrator, IntegratorKind::SymplecticEuler);
        assert_eq!(cfg.engine.force_law, ForceLawConfig::InverseSquare);
        assert_eq!(cfg.engine.render_mode, RenderMode::Plain);
        assert_eq!(cfg.parameters.count, 2);
        assert_eq!(cfg.parameters.seed, Some(7));
        assert_eq!(cfg.parameters.mass, MASS);
        assert_eq!(cfg.render.size, 200);
        assert_eq!(cfg.render.canvas_extent(), 201);
        assert_eq!(cfg.render.draw_radius, DRAW_RADIUS);
    }

    #[test]
    fn explicit_bodies_override_count() {
        let cfg = ScenarioConfig::from_yaml_str(
            r#"
parameters:
  count: 5
bodies:
  - x: [ -1.0, 0.0 ]
  - x: [ 1.0, 0.0 ]
    v: [ 0.0, 2.0 ]
"#,
        )
        .unwrap();
        assert_eq!(cfg.particle_count(), 2);
        assert_eq!(cfg.bodies[0].v, [0.0, 0.0]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = ScenarioConfig::default();
        cfg.parameters.count = 0;
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));

        let mut cfg = ScenarioConfig::default();
        cfg.parameters.epoch = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = ScenarioConfig::default();
        cfg.parameters.mass = f64::NAN;
        assert!(cfg.validate().is_err());

        assert!(ScenarioConfig::from_yaml_str("render:\n  fade_generations: 0\n").is_err());
    }

    #[test]
    fn render_size_is_bounded() {
        let mut cfg = ScenarioConfig::default();
        cfg.render.size = u32::MAX;
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));

        cfg.render.size = MAX_SIZE;
        cfg.validate().unwrap();
        assert_eq!(cfg.render.canvas_extent(), MAX_SIZE + 1);

        assert!(ScenarioConfig::from_yaml_str("render:\n  size: 4294967295\n").is_err());
    }

    #[test]
    fn encoder_args_describe_pipe_input() {
        let args = EncoderConfig::default().args();
        assert_eq!(&args[..4], &["-f", "image2pipe", "-pix_fmt", "yuv420p"]);
        assert!(args.windows(2).any(|w| w[0] == "-r" && w[1] == "24"));
        assert!(args.windows(2).any(|w| w[0] == "-i" && w[1] == "-"));
        assert_eq!(args.last().map(String::as_str), Some("-"));
    }
}
