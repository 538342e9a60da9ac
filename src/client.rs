//! The caller-facing submission surface.
//!
//! A `Client` owns a configuration and one backend. Every submission is
//! synchronous and independent: normalize the measurement, build the
//! series, hand the batch to the backend, return its acknowledgment or
//! error. No state is shared across calls and no locking is introduced
//! here; concurrent use is as safe as the underlying transport makes it.

use config::Config;
use error::Error;
use metric::{Host, Measurement, MetricKind, Series};
use sink::{Ack, SeriesSink};
use time;

/// A metric submission client over one backend.
pub struct Client<S> {
    config: Config,
    sink: S,
}

impl<S> Client<S>
where
    S: SeriesSink,
{
    /// Create a client submitting through `sink`.
    pub fn new(config: Config, sink: S) -> Client<S> {
        Client {
            config: config,
            sink: sink,
        }
    }

    /// The backend, for inspection.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn build(
        &self,
        name: &str,
        measurement: Measurement,
        host: Host,
        device: Option<&str>,
        kind: Option<MetricKind>,
    ) -> Series {
        let points = measurement.into_points(time::now());
        Series::build(
            name,
            points,
            host,
            device.map(|d| d.to_string()),
            kind,
            &self.config,
        )
    }

    /// Submit one metric.
    ///
    /// `measurement` may be a bare number, a `(timestamp, value)` pair
    /// or a full sequence of pairs. Pass `Host::Inherit` to scope the
    /// series to the configured default host and `Host::Omit` to submit
    /// without a host; the two are not the same thing.
    pub fn submit_one<M>(
        &mut self,
        name: &str,
        measurement: M,
        host: Host,
        device: Option<&str>,
        kind: Option<MetricKind>,
    ) -> Result<Ack, Error>
    where
        M: Into<Measurement>,
    {
        let series = self.build(name, measurement.into(), host, device, kind);
        self.submit(&[series])
    }

    /// Submit a mapping of metric name to measurement as one batch.
    ///
    /// Every entry is built independently under the same defaulting
    /// rules as `submit_one` with an inherited host, and the whole batch
    /// goes out in a single backend dispatch, entries in iteration
    /// order. No cross-entry validation happens: the backend decides
    /// what to do with an entry it cannot use.
    pub fn submit_many<I>(&mut self, batch: I) -> Result<Ack, Error>
    where
        I: IntoIterator<Item = (String, Measurement)>,
    {
        let series: Vec<Series> = batch
            .into_iter()
            .map(|(name, measurement)| self.build(&name, measurement, Host::Inherit, None, None))
            .collect();
        self.submit(&series)
    }

    /// Submit already-built series. One call, one backend dispatch.
    pub fn submit(&mut self, series: &[Series]) -> Result<Ack, Error> {
        self.sink.send(series)
    }
}
