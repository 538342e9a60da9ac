//! The statsd line protocol backend.
//!
//! Valid lines on this wire are:
//!
//! - `<str:metric_name>:<f64:value>|<str:type>`
//! - `<str:metric_name>:<f64:value>|c|@<f64:sample_rate>`
//!
//! The protocol carries no time dimension: a series of N timestamped
//! points becomes N independently-timed lines whose effective time is the
//! flush, not the original sample. That loss is inherent to the protocol
//! and is preserved here, not worked around.

use config::ResponseMode;
use error::Error;
use metric::{MetricKind, Series};
use sink::{Ack, SeriesSink};
use std::str::FromStr;
use transport::LineSender;

/// The line protocol backend.
///
/// Series the protocol cannot express are dropped one at a time with a
/// diagnostic -- one bad series never invalidates the rest of the batch.
pub struct Statsd<T> {
    sender: T,
    mode: ResponseMode,
    dropped: u64,
}

impl<T> Statsd<T>
where
    T: LineSender,
{
    /// Wire a line protocol backend over `sender`.
    pub fn new(sender: T, mode: ResponseMode) -> Statsd<T> {
        Statsd {
            sender: sender,
            mode: mode,
            dropped: 0,
        }
    }

    /// How many series this sink has dropped as unsupported. A policy
    /// layer that wants unsupported kinds to be fatal can watch this.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// The underlying sender, for inspection.
    pub fn get_ref(&self) -> &T {
        &self.sender
    }
}

/// Resolve the line protocol type abbreviation for `series`. `None`
/// means the protocol cannot express the series' kind at all.
fn type_abbrev(series: &Series) -> Option<String> {
    match series.kind {
        // Note: not all statsd implementations support gauges.
        MetricKind::Gauge => Some("g".to_string()),
        MetricKind::Counter => {
            // A rate that fails to parse is absent, not an error.
            let rate = series
                .sample_rate
                .as_ref()
                .and_then(|r| f64::from_str(r).ok());
            match rate {
                Some(rate) if rate > 0.0 => Some(format!("c|@{}", rate)),
                _ => Some("c".to_string()),
            }
        }
        MetricKind::Timer => Some(series.unit.clone().unwrap_or_else(|| "ms".to_string())),
        MetricKind::Raw => None,
    }
}

impl<T> SeriesSink for Statsd<T>
where
    T: LineSender,
{
    fn send(&mut self, series: &[Series]) -> Result<Ack, Error> {
        let mut lines = Vec::new();
        for s in series {
            // Incomplete series never produce wire output. A missing
            // name or a missing point run each disqualifies on its own.
            if s.metric.is_empty() || s.points.is_empty() {
                continue;
            }
            let abbrev = match type_abbrev(s) {
                Some(abbrev) => abbrev,
                None => {
                    warn!(
                        "statsd cannot express {:?} series {}, dropping it",
                        s.kind, s.metric
                    );
                    self.dropped += 1;
                    continue;
                }
            };
            // Timestamps stop here; the wire has nowhere to put them.
            for point in &s.points {
                lines.push(format!("{}:{}|{}", s.metric, point.value, abbrev));
            }
        }
        // One submission is one flush, even when every series was
        // skipped. A sender failure aborts whatever was not yet sent.
        self.sender.send_lines(&lines)?;
        Ok(Ack::for_mode(self.mode))
    }
}

#[cfg(test)]
mod tests {
    extern crate quickcheck;

    use self::quickcheck::{QuickCheck, TestResult};
    use config::ResponseMode;
    use error::Error;
    use metric::{MetricKind, Point, Series};
    use sink::{Ack, SeriesSink};
    use sinks::statsd::Statsd;
    use std::io;
    use transport::LineSender;

    #[derive(Default)]
    struct Recorder {
        flushes: Vec<Vec<String>>,
    }

    impl LineSender for Recorder {
        fn send_lines(&mut self, lines: &[String]) -> Result<(), Error> {
            self.flushes.push(lines.to_vec());
            Ok(())
        }
    }

    struct Unreachable;

    impl LineSender for Unreachable {
        fn send_lines(&mut self, _: &[String]) -> Result<(), Error> {
            Err(Error::from(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "nobody home",
            )))
        }
    }

    fn point(value: f64) -> Point {
        Point {
            time: 1317652676,
            value: value,
        }
    }

    #[test]
    fn gauge_line() {
        let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);
        sink.send(&[Series::new("x", vec![point(5.0)])]).unwrap();
        assert_eq!(vec![vec!["x:5|g".to_string()]], sink.get_ref().flushes);
    }

    #[test]
    fn counter_line_with_and_without_rate() {
        let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);

        let plain = Series::new("x", vec![point(5.0)]).kind(MetricKind::Counter);
        let sampled = Series::new("x", vec![point(5.0)])
            .kind(MetricKind::Counter)
            .sample_rate("0.5");
        let garbled = Series::new("x", vec![point(5.0)])
            .kind(MetricKind::Counter)
            .sample_rate("half");
        let zero = Series::new("x", vec![point(5.0)])
            .kind(MetricKind::Counter)
            .sample_rate("0");

        sink.send(&[plain, sampled, garbled, zero]).unwrap();

        assert_eq!(
            vec![
                vec![
                    "x:5|c".to_string(),
                    "x:5|c|@0.5".to_string(),
                    // an unparsable rate degrades to a plain counter
                    "x:5|c".to_string(),
                    "x:5|c".to_string(),
                ],
            ],
            sink.get_ref().flushes
        );
    }

    #[test]
    fn timer_line_defaults_to_ms() {
        let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);

        let unitless = Series::new("x", vec![point(5.0)]).kind(MetricKind::Timer);
        let seconds = Series::new("x", vec![point(5.0)])
            .kind(MetricKind::Timer)
            .unit("s");

        sink.send(&[unitless, seconds]).unwrap();

        assert_eq!(
            vec![vec!["x:5|ms".to_string(), "x:5|s".to_string()]],
            sink.get_ref().flushes
        );
    }

    #[test]
    fn incomplete_series_never_reach_the_wire() {
        let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);

        let nameless = Series::new("", vec![point(5.0)]);
        let pointless = Series::new("x", Vec::new());
        let empty = Series::new("", Vec::new());
        let whole = Series::new("y", vec![point(6.0)]);

        sink.send(&[nameless, pointless, empty, whole]).unwrap();

        // the rest of the batch still flushes, in one call
        assert_eq!(vec![vec!["y:6|g".to_string()]], sink.get_ref().flushes);
        assert_eq!(0, sink.dropped());
    }

    #[test]
    fn unsupported_kind_is_dropped_not_fatal() {
        let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);

        let untyped = Series::new("x", vec![point(5.0)]).kind(MetricKind::Raw);
        let fine = Series::new("y", vec![point(6.0)]);

        sink.send(&[untyped, fine]).unwrap();

        assert_eq!(vec![vec!["y:6|g".to_string()]], sink.get_ref().flushes);
        assert_eq!(1, sink.dropped());
    }

    #[test]
    fn timestamps_are_discarded_by_design() {
        let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);

        let series = Series::new(
            "x",
            vec![
                Point {
                    time: 1,
                    value: 5.0,
                },
                Point {
                    time: 2,
                    value: 6.0,
                },
                Point {
                    time: 3,
                    value: 7.0,
                },
            ],
        );

        sink.send(&[series]).unwrap();

        // three points, three lines, one flush, no timestamp anywhere
        assert_eq!(1, sink.get_ref().flushes.len());
        assert_eq!(
            vec![
                "x:5|g".to_string(),
                "x:6|g".to_string(),
                "x:7|g".to_string(),
            ],
            sink.get_ref().flushes[0]
        );
    }

    #[test]
    fn every_point_becomes_exactly_one_line() {
        fn inner(values: Vec<f64>) -> TestResult {
            let points = values
                .iter()
                .map(|&v| Point {
                    time: 0,
                    value: v,
                })
                .collect();
            let mut sink = Statsd::new(Recorder::default(), ResponseMode::Raw);
            sink.send(&[Series::new("x", points)]).unwrap();

            assert_eq!(1, sink.get_ref().flushes.len());
            if values.is_empty() {
                // incomplete: skipped, but still exactly one flush
                assert!(sink.get_ref().flushes[0].is_empty());
            } else {
                assert_eq!(values.len(), sink.get_ref().flushes[0].len());
            }
            TestResult::passed()
        }
        QuickCheck::new().quickcheck(inner as fn(Vec<f64>) -> TestResult);
    }

    #[test]
    fn ack_shape_follows_response_mode() {
        let mut structured = Statsd::new(Recorder::default(), ResponseMode::Structured);
        assert_eq!(
            Ack::Structured(json!({})),
            structured
                .send(&[Series::new("x", vec![point(5.0)])])
                .unwrap()
        );

        let mut raw = Statsd::new(Recorder::default(), ResponseMode::Raw);
        assert_eq!(
            Ack::Empty,
            raw.send(&[Series::new("x", vec![point(5.0)])]).unwrap()
        );
    }

    #[test]
    fn sender_failure_surfaces_once() {
        let mut sink = Statsd::new(Unreachable, ResponseMode::Raw);
        match sink.send(&[Series::new("x", vec![point(5.0)])]) {
            Err(Error::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
