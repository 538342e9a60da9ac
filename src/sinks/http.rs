//! The batched JSON HTTP backend.
//!
//! Every series of a submission is serialized into one request body and
//! shipped in exactly one `POST /series`. All-or-nothing: there is no
//! retry and no partial resubmission; a transport failure is one error
//! for the whole batch.

use config::ResponseMode;
use error::Error;
use metric::Series;
use serde_json;
use sink::{Ack, SeriesSink};
use transport::HttpRequest;

#[derive(Serialize)]
struct Payload<'a> {
    series: Vec<WireSeries<'a>>,
}

/// One series as the ingestion API spells it. Points are two-element
/// `[timestamp, value]` arrays, not objects; absent scoping fields ship
/// as `null`.
#[derive(Serialize)]
struct WireSeries<'a> {
    metric: &'a str,
    points: Vec<(i64, f64)>,
    #[serde(rename = "type")]
    kind: Option<&'static str>,
    host: Option<&'a str>,
    device: Option<&'a str>,
}

/// The HTTP batch backend.
pub struct HttpSeries<T> {
    transport: T,
    mode: ResponseMode,
}

impl<T> HttpSeries<T>
where
    T: HttpRequest,
{
    /// Wire a batch backend over `transport`.
    pub fn new(transport: T, mode: ResponseMode) -> HttpSeries<T> {
        HttpSeries {
            transport: transport,
            mode: mode,
        }
    }

    /// The underlying transport, for inspection.
    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    fn payload<'a>(series: &'a [Series]) -> Payload<'a> {
        Payload {
            series: series
                .iter()
                .map(|s| {
                    WireSeries {
                        metric: &s.metric,
                        points: s.points.iter().map(|p| (p.time, p.value)).collect(),
                        kind: s.kind.wire_name(),
                        host: s.host.as_ref().map(String::as_str),
                        device: s.device.as_ref().map(String::as_str),
                    }
                })
                .collect(),
        }
    }
}

impl<T> SeriesSink for HttpSeries<T>
where
    T: HttpRequest,
{
    fn send(&mut self, series: &[Series]) -> Result<Ack, Error> {
        let body = serde_json::to_value(HttpSeries::<T>::payload(series))
            .expect("series payload is representable JSON");
        self.transport.request("POST", "/series", &body)?;
        Ok(Ack::for_mode(self.mode))
    }
}
