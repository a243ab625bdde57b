//! Append-only byte sinks that receive encoded frames.

use std::io::{self, Write};

/// Destination for encoded frames
///
/// A write either lands completely or fails; the caller treats the first
/// failure as the end of the run.
pub trait FrameSink {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Adapter that turns any [`Write`] into a [`FrameSink`]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> FrameSink for WriterSink<W> {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.inner.flush()
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_frame(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_appends_without_framing() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_frame(b"abc").unwrap();
        sink.write_frame(b"de").unwrap();
        assert_eq!(sink.into_inner(), b"abcde");
    }

    #[test]
    fn writer_errors_surface() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = WriterSink::new(Closed);
        let err = sink.write_frame(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
