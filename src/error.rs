use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation, rendering and streaming core.
///
/// Every failure here is scoped to a single run: callers decide whether to
/// retry, log, or give up, but nothing in the library aborts the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected scenario or render configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A particle's position or velocity stopped being finite after a tick.
    #[error("non-finite state for particle {index} after tick {tick}")]
    NonFinite { tick: u64, index: usize },

    /// Writing an encoded frame to the sink failed. Terminal for the run.
    #[error("frame sink closed: {0}")]
    Sink(#[source] std::io::Error),

    /// The external video encoder could not be started or wired up.
    #[error("encoder process: {0}")]
    Encoder(String),

    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidConfig("count must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("count"));

        let e = Error::NonFinite { tick: 12, index: 1 };
        assert_eq!(format!("{e}"), "non-finite state for particle 1 after tick 12");
    }

    #[test]
    fn sink_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe gone");
        let e = Error::Sink(io);
        assert!(std::error::Error::source(&e).is_some());
        assert!(format!("{e}").contains("pipe gone"));
    }
}
