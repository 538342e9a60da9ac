//! The contract every submission backend satisfies.

use config::ResponseMode;
use error::Error;
use metric::Series;
use serde_json;

/// A successful submission's acknowledgment.
#[derive(Clone, Debug, PartialEq)]
pub enum Ack {
    /// An empty structured acknowledgment.
    Structured(serde_json::Value),
    /// No payload. Callers treat the absence of an error as success.
    Empty,
}

impl Ack {
    /// The acknowledgment a successful dispatch produces under `mode`.
    pub fn for_mode(mode: ResponseMode) -> Ack {
        match mode {
            ResponseMode::Structured => Ack::Structured(json!({})),
            ResponseMode::Raw => Ack::Empty,
        }
    }
}

/// A sink for built series.
///
/// This is the single polymorphic surface between the submission client
/// and its backends; callers never learn which implementation is plugged
/// in. One call to `send` is exactly one backend dispatch -- one HTTP
/// request or one flush of lines -- never a silent split across several
/// network operations. Series arrive in caller order.
pub trait SeriesSink {
    /// Translate and dispatch `series` in a single backend operation.
    fn send(&mut self, series: &[Series]) -> Result<Ack, Error>;
}
