//! External video encoder running as a child process.
//!
//! Encoded frames go to the child's stdin; whatever the child writes to its
//! stdout is copied verbatim to a caller-supplied writer on a helper thread.
//! Failing to start the child is an error for this run only.

use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use super::codec::FrameCodec;
use super::run::{run_stream, CancelToken, FrameSource, RunSummary};
use super::sink::FrameSink;
use crate::configuration::config::EncoderConfig;
use crate::error::{Error, Result};

pub struct EncoderProcess {
    program: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    pump: Option<JoinHandle<io::Result<u64>>>, // stdout -> output copier
}

impl EncoderProcess {
    /// Start the configured encoder (ffmpeg by default) reading an image
    /// sequence on stdin
    pub fn spawn<W>(cfg: &EncoderConfig, output: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        Self::spawn_command(&cfg.program, &cfg.args(), output)
    }

    pub fn spawn_command<W>(program: &str, args: &[String], mut output: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Encoder(format!("failed to start {program}: {e}")))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let (Some(stdin), Some(mut stdout)) = (stdin, stdout) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::Encoder(format!("{program}: stdio pipes unavailable")));
        };

        let pump = thread::spawn(move || {
            let n = io::copy(&mut stdout, &mut output)?;
            output.flush()?;
            Ok(n)
        });

        debug!("encoder {program} started with pid {}", child.id());

        Ok(Self {
            program: program.to_string(),
            child: Some(child),
            stdin: Some(stdin),
            pump: Some(pump),
        })
    }

    /// Close the encoder's input, drain its output and wait for it to exit
    pub fn finish(mut self) -> Result<ExitStatus> {
        // EOF on stdin lets the encoder flush its trailer
        drop(self.stdin.take());

        if let Some(pump) = self.pump.take() {
            match pump.join() {
                Ok(Ok(n)) => debug!("encoder {} produced {n} bytes", self.program),
                Ok(Err(e)) => warn!("copying encoder output failed: {e}"),
                Err(_) => warn!("encoder output thread panicked"),
            }
        }

        match self.child.take() {
            Some(mut child) => Ok(child.wait()?),
            None => Err(Error::Encoder(format!("{} already reaped", self.program))),
        }
    }

    /// Stream `source` into the encoder, then shut it down. How the encoder
    /// exits is only logged; the result is always the run's own.
    pub fn run<S>(
        mut self,
        source: &mut S,
        codec: &FrameCodec,
        cancel: &CancelToken,
        frame_limit: Option<u64>,
    ) -> Result<RunSummary>
    where
        S: FrameSource + ?Sized,
    {
        let outcome = run_stream(source, codec, &mut self, cancel, frame_limit);
        let program = self.program.clone();

        match self.finish() {
            Ok(status) if status.success() => info!("encoder {program} exited with {status}"),
            Ok(status) => warn!("encoder {program} exited with {status}"),
            Err(e) => warn!("encoder {program} did not shut down cleanly: {e}"),
        }
        outcome
    }
}

impl FrameSink for EncoderProcess {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.stdin.as_mut() {
            Some(stdin) => {
                stdin.write_all(bytes)?;
                stdin.flush()
            }
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "encoder input closed")),
        }
    }
}

impl Drop for EncoderProcess {
    fn drop(&mut self) {
        // dropped without finish(): release the pipe and don't leave a zombie
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(pump) = self.pump.take() {
            let _ = pump.join();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_is_forwarded_verbatim() {
        let out = Shared::default();
        let mut enc = EncoderProcess::spawn_command("cat", &[], out.clone()).unwrap();
        enc.write_frame(b"frame-1").unwrap();
        enc.write_frame(b"frame-2").unwrap();
        let status = enc.finish().unwrap();

        assert!(status.success());
        assert_eq!(out.0.lock().unwrap().as_slice(), b"frame-1frame-2");
    }

    struct Blank;

    impl FrameSource for Blank {
        fn next_frame(&mut self) -> Result<crate::visualization::frame::Frame> {
            use crate::visualization::frame::{Frame, Palette};
            Ok(Frame::new(4, 4, Palette::green_on_black()))
        }
    }

    #[test]
    fn failed_encoder_exit_keeps_run_result() {
        let enc = EncoderProcess::spawn_command("false", &[], io::sink()).unwrap();
        let summary = enc.run(&mut Blank, &FrameCodec::png(), &CancelToken::new(), Some(0)).unwrap();

        assert_eq!(summary.frames, 0);
        assert_eq!(summary.reason, crate::streaming::run::StopReason::FrameLimit);
    }

    #[test]
    fn sink_error_survives_encoder_shutdown() {
        // `true` never reads its input, so writes fail once it has exited
        let enc = EncoderProcess::spawn_command("true", &[], io::sink()).unwrap();
        let res = enc.run(&mut Blank, &FrameCodec::png(), &CancelToken::new(), None);

        assert!(matches!(res, Err(Error::Sink(_))));
    }

    #[test]
    fn missing_program_is_a_run_error() {
        let err = EncoderProcess::spawn_command("definitely-not-an-encoder-xyz", &[], io::sink());
        assert!(matches!(err, Err(Error::Encoder(_))));
    }
}
