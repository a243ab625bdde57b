//! The per-run tick loop
//!
//! One run = one frame source, one codec, one sink, one cancel token. Each
//! iteration renders a frame, advances the source, encodes the frame and
//! writes it. The loop ends when the token is cancelled, an optional frame
//! limit is reached, or any step fails; a failed sink write always ends it.
//! Runs share nothing, so several can go in parallel on separate threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};

use super::codec::FrameCodec;
use super::sink::FrameSink;
use crate::configuration::config::ScenarioConfig;
use crate::error::{Error, Result};
use crate::simulation::scenario::Scenario;
use crate::visualization::frame::Frame;
use crate::visualization::lissajous::Lissajous;
use crate::visualization::renderer::FrameRenderer;

/// Anything that yields one frame per tick
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame>;
}

/// Particle system plus the renderer that owns its trail history
pub struct NBodySource {
    pub scenario: Scenario,
    pub renderer: FrameRenderer,
}

impl NBodySource {
    pub fn new(scenario: Scenario, cfg: &ScenarioConfig) -> Self {
        let renderer = FrameRenderer::new(&cfg.render, cfg.engine.render_mode, cfg.engine.overlay);
        Self { scenario, renderer }
    }
}

impl FrameSource for NBodySource {
    fn next_frame(&mut self) -> Result<Frame> {
        // render reads the snapshot; the step replaces it afterwards
        let frame = self.renderer.render(&self.scenario.system);
        self.scenario.step()?;
        Ok(frame)
    }
}

impl FrameSource for Lissajous {
    fn next_frame(&mut self) -> Result<Frame> {
        Ok(self.render())
    }
}

/// Shared cancellation flag for a run
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    FrameLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub bytes: u64,
    pub reason: StopReason,
}

/// Drive `source` into `sink` until cancelled, `frame_limit` frames were
/// written, or something fails
pub fn run_stream<S, K>(
    source: &mut S,
    codec: &FrameCodec,
    sink: &mut K,
    cancel: &CancelToken,
    frame_limit: Option<u64>,
) -> Result<RunSummary>
where
    S: FrameSource + ?Sized,
    K: FrameSink + ?Sized,
{
    let mut frames = 0u64;
    let mut bytes = 0u64;

    let reason = loop {
        if cancel.is_cancelled() {
            break StopReason::Cancelled;
        }
        if frame_limit.is_some_and(|limit| frames >= limit) {
            break StopReason::FrameLimit;
        }

        let frame = source.next_frame().inspect_err(|e| {
            if let Error::NonFinite { .. } = e {
                error!("simulation diverged: {e}");
            }
        })?;
        let encoded = codec.encode(&frame)?;

        if let Err(e) = sink.write_frame(&encoded) {
            warn!("frame sink failed after {frames} frames: {e}");
            return Err(Error::Sink(e));
        }

        frames += 1;
        bytes += encoded.len() as u64;
        if frames % 1000 == 0 {
            debug!("{frames} frames, {bytes} bytes written");
        }
    };

    info!("run stopped ({reason:?}) after {frames} frames, {bytes} bytes");
    Ok(RunSummary { frames, bytes, reason })
}
