//! The metric data model: measurement shapes, points, host scoping and
//! the series value object both backends consume.
//!
//! A `Series` is built once per submission call and discarded after the
//! backend has consumed it. Nothing in this module is shared or mutated
//! after construction.

use config::Config;
use error::Error;
use serde_json;

/// The kind of a series.
///
/// `Gauge` is the universal default. `Raw` is the untyped kind: the HTTP
/// backend ships it with a `null` type and the line protocol backend
/// rejects it as unsupported.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// An instantaneous value.
    Gauge,
    /// An incrementing count, optionally sampled.
    Counter,
    /// A duration, carrying a unit.
    Timer,
    /// An untyped series.
    Raw,
}

impl MetricKind {
    /// The kind's name on the HTTP series wire. `Raw` series have no
    /// type there and ship a `null`.
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            MetricKind::Gauge => Some("gauge"),
            MetricKind::Counter => Some("counter"),
            MetricKind::Timer => Some("timer"),
            MetricKind::Raw => None,
        }
    }
}

impl Default for MetricKind {
    fn default() -> MetricKind {
        MetricKind::Gauge
    }
}

/// A single timestamped datum.
///
/// The timestamp is always populated: bare scalar measurements are
/// stamped with the wall-clock at the moment of the call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Seconds since the Unix epoch.
    pub time: i64,
    /// The measured value.
    pub value: f64,
}

/// The shapes a caller may hand us for one metric.
///
/// Exists only for the duration of a call; `into_points` canonicalizes
/// every shape to an ordered sequence of `Point`s.
#[derive(Clone, Debug, PartialEq)]
pub enum Measurement {
    /// A bare number, stamped with the time of the call.
    Value(f64),
    /// A single (timestamp, value) pair. The caller's timestamp is
    /// preserved exactly, never overridden.
    Stamped(i64, f64),
    /// An explicit sequence of (timestamp, value) pairs, passed through
    /// untouched and in order.
    Sequence(Vec<(i64, f64)>),
}

impl Measurement {
    /// Canonicalize to an ordered sequence of points. `now` is only
    /// consulted for the bare scalar shape.
    pub fn into_points(self, now: i64) -> Vec<Point> {
        match self {
            Measurement::Value(v) => vec![
                Point {
                    time: now,
                    value: v,
                },
            ],
            Measurement::Stamped(t, v) => vec![
                Point {
                    time: t,
                    value: v,
                },
            ],
            Measurement::Sequence(pairs) => pairs
                .into_iter()
                .map(|(t, v)| {
                    Point {
                        time: t,
                        value: v,
                    }
                })
                .collect(),
        }
    }

    /// Interpret a dynamically shaped JSON value as a measurement.
    ///
    /// Accepted shapes are a number, a two-element `[timestamp, value]`
    /// array of numbers and an array of such pairs. Anything else is a
    /// caller contract violation and fails with `Error::InvalidInput`
    /// before any network activity happens.
    pub fn from_json(value: &serde_json::Value) -> Result<Measurement, Error> {
        match *value {
            serde_json::Value::Number(ref n) => {
                let v = n.as_f64()
                    .ok_or(Error::InvalidInput("number does not fit a 64 bit float"))?;
                Ok(Measurement::Value(v))
            }
            serde_json::Value::Array(ref items) => {
                if items.iter().all(|item| item.is_array()) {
                    let mut pairs = Vec::with_capacity(items.len());
                    for item in items {
                        pairs.push(pair_from_json(item)?);
                    }
                    Ok(Measurement::Sequence(pairs))
                } else {
                    let (t, v) = pair_from_json(value)?;
                    Ok(Measurement::Stamped(t, v))
                }
            }
            _ => Err(Error::InvalidInput(
                "expected a number, a [timestamp, value] pair or a list of pairs",
            )),
        }
    }
}

fn pair_from_json(value: &serde_json::Value) -> Result<(i64, f64), Error> {
    let items = value
        .as_array()
        .ok_or(Error::InvalidInput("expected a [timestamp, value] pair"))?;
    if items.len() != 2 {
        return Err(Error::InvalidInput(
            "a pair holds exactly a timestamp and a value",
        ));
    }
    let t = items[0]
        .as_f64()
        .ok_or(Error::InvalidInput("pair timestamp must be numeric"))?;
    let v = items[1]
        .as_f64()
        .ok_or(Error::InvalidInput("pair value must be numeric"))?;
    Ok((t as i64, v))
}

impl From<f64> for Measurement {
    fn from(v: f64) -> Measurement {
        Measurement::Value(v)
    }
}

impl From<i64> for Measurement {
    fn from(v: i64) -> Measurement {
        Measurement::Value(v as f64)
    }
}

impl From<(i64, f64)> for Measurement {
    fn from(pair: (i64, f64)) -> Measurement {
        Measurement::Stamped(pair.0, pair.1)
    }
}

impl From<Vec<(i64, f64)>> for Measurement {
    fn from(pairs: Vec<(i64, f64)>) -> Measurement {
        Measurement::Sequence(pairs)
    }
}

/// Host scoping for a series.
///
/// Saying nothing and explicitly suppressing the host are observably
/// different: `Inherit` resolves to the configured default host at build
/// time while `Omit` keeps the series host-less. The two must never
/// collapse into one another.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Host {
    /// No host given; resolve to the configured default.
    Inherit,
    /// Explicitly no host. Survives resolution as absent.
    Omit,
    /// Scope the series to this host.
    Named(String),
}

impl Host {
    /// Resolve against the configured default host. This happens at
    /// series build time, never later.
    pub fn resolve(self, default_host: Option<&str>) -> Option<String> {
        match self {
            Host::Inherit => default_host.map(|h| h.to_string()),
            Host::Omit => None,
            Host::Named(h) => Some(h),
        }
    }
}

impl Default for Host {
    fn default() -> Host {
        Host::Inherit
    }
}

impl<'a> From<&'a str> for Host {
    fn from(h: &'a str) -> Host {
        Host::Named(h.to_string())
    }
}

impl From<String> for Host {
    fn from(h: String) -> Host {
        Host::Named(h)
    }
}

/// A named, typed, host/device-scoped run of points.
///
/// This is the value object both backends consume. The sampling rate is
/// carried as unparsed text on purpose: a rate that fails to parse as a
/// number degrades to "absent" when the line protocol encodes it, it is
/// not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// The metric name. Must be non-empty to reach any wire.
    pub metric: String,
    /// The data points, in caller order.
    pub points: Vec<Point>,
    /// The series kind.
    pub kind: MetricKind,
    /// The host the series is scoped to, if any.
    pub host: Option<String>,
    /// The device the series is scoped to, if any.
    pub device: Option<String>,
    /// Counter sampling rate, unparsed. Ignored for other kinds.
    pub sample_rate: Option<String>,
    /// Timer unit. Ignored for other kinds; the line protocol defaults
    /// it to `ms`.
    pub unit: Option<String>,
}

impl Series {
    /// Create a gauge series with no scoping.
    pub fn new<S>(metric: S, points: Vec<Point>) -> Series
    where
        S: Into<String>,
    {
        Series {
            metric: metric.into(),
            points: points,
            kind: MetricKind::Gauge,
            host: None,
            device: None,
            sample_rate: None,
            unit: None,
        }
    }

    /// Build a series the way the submission surface does: the host
    /// tri-state resolves against the configured default host here and
    /// the kind falls back to the configured default kind.
    pub fn build<S>(
        metric: S,
        points: Vec<Point>,
        host: Host,
        device: Option<String>,
        kind: Option<MetricKind>,
        config: &Config,
    ) -> Series
    where
        S: Into<String>,
    {
        Series {
            metric: metric.into(),
            points: points,
            kind: kind.unwrap_or(config.default_metric_type),
            host: host.resolve(config.default_host.as_ref().map(String::as_str)),
            device: device,
            sample_rate: None,
            unit: None,
        }
    }

    /// Set the series kind.
    pub fn kind(mut self, kind: MetricKind) -> Series {
        self.kind = kind;
        self
    }

    /// Scope the series to a host.
    pub fn host<S>(mut self, host: S) -> Series
    where
        S: Into<String>,
    {
        self.host = Some(host.into());
        self
    }

    /// Scope the series to a device.
    pub fn device<S>(mut self, device: S) -> Series
    where
        S: Into<String>,
    {
        self.device = Some(device.into());
        self
    }

    /// Set a counter sampling rate.
    pub fn sample_rate<S>(mut self, rate: S) -> Series
    where
        S: Into<String>,
    {
        self.sample_rate = Some(rate.into());
        self
    }

    /// Set a timer unit.
    pub fn unit<S>(mut self, unit: S) -> Series
    where
        S: Into<String>,
    {
        self.unit = Some(unit.into());
        self
    }
}
