use nbody_stream::{bench_encode, bench_ticks, run_stream};
use nbody_stream::{CancelToken, EncoderProcess, FrameCodec, FrameSource, Lissajous, NBodySource, Scenario, ScenarioConfig, WriterSink};
use nbody_stream::visualization::lissajous;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::io;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Scene {
    ThreeBody,
    TwoBody,
    Trails,
    Lissajous,
}

/// Stream a 2D gravity simulation as an encoded video on stdout
#[derive(Parser, Debug)]
struct Args {
    #[arg(value_enum, default_value = "three-body")]
    scene: Scene,

    /// YAML scenario overriding the built-in preset
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Write the encoded image sequence to stdout without an encoder
    #[arg(long)]
    raw: bool,

    /// Print tick and encode timings instead of streaming
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = match &args.file {
        Some(path) => ScenarioConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => match args.scene {
            Scene::ThreeBody => ScenarioConfig::three_body(),
            Scene::TwoBody => ScenarioConfig::two_body(),
            Scene::Trails => ScenarioConfig::trails(),
            Scene::Lissajous => {
                let mut cfg = ScenarioConfig::default();
                cfg.encoder.frame_rate = lissajous::FRAME_RATE;
                cfg
            }
        },
    };

    if args.seed.is_some() {
        cfg.parameters.seed = args.seed;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.bench {
        bench_ticks();
        bench_encode();
        return Ok(());
    }

    let cfg = load_scenario(&args)?;
    let seed = cfg.parameters.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut source: Box<dyn FrameSource> = match args.scene {
        Scene::Lissajous => {
            let l = Lissajous::new(&mut rng);
            info!("lissajous: freq {:.4}, seed {seed}", l.freq);
            Box::new(l)
        }
        _ => {
            let scenario = Scenario::build(&cfg, &mut rng)?;
            info!(
                "{:?}: {} particles, {:?} law, {} integrator, {:?} render, {:?} frames, seed {seed}",
                args.scene,
                scenario.system.len(),
                cfg.engine.force_law,
                scenario.integrator.name(),
                cfg.engine.render_mode,
                cfg.engine.encoding,
            );
            Box::new(NBodySource::new(scenario, &cfg))
        }
    };

    let codec = FrameCodec::new(cfg.engine.encoding, cfg.render.jpeg_quality);
    let cancel = CancelToken::new();
    // Ctrl-C ends the run between frames so the encoder still gets EOF
    let on_interrupt = cancel.clone();
    ctrlc::set_handler(move || on_interrupt.cancel()).context("failed to install Ctrl-C handler")?;

    let outcome = if args.raw {
        let mut sink = WriterSink::new(io::stdout().lock());
        run_stream(source.as_mut(), &codec, &mut sink, &cancel, args.frames)
    } else {
        let encoder = EncoderProcess::spawn(&cfg.encoder, io::stdout())?;
        encoder.run(source.as_mut(), &codec, &cancel, args.frames)
    };

    match outcome {
        Ok(summary) => {
            info!("done: {} frames, {} bytes", summary.frames, summary.bytes);
            Ok(())
        }
        // the reader went away; the normal way for an endless stream to end
        Err(nbody_stream::Error::Sink(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            info!("output closed, stopping");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
