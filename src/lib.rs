pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod streaming;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::states::{Particle, ParticleSystem, NVec2};
pub use simulation::forces::{ForceLaw, ForceSet, SoftenedGravity, InverseSquareGravity};
pub use simulation::integrator::{Integrator, IntegratorKind, Leapfrog, SymplecticEuler};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BodyConfig, RenderConfig, EncoderConfig, ForceLawConfig, RenderMode, Encoding};

pub use visualization::{frame::{Frame, Palette}, renderer::FrameRenderer, lissajous::Lissajous};

pub use streaming::{codec::FrameCodec, sink::{FrameSink, WriterSink}, encoder::EncoderProcess};
pub use streaming::run::{run_stream, CancelToken, FrameSource, NBodySource, RunSummary, StopReason};

pub use benchmark::benchmark::{bench_ticks, bench_encode};
