#[macro_use]
extern crate criterion;

use criterion::Criterion;

extern crate dogwire;

use dogwire::config::ResponseMode;
use dogwire::error::Error;
use dogwire::metric::{MetricKind, Point, Series};
use dogwire::sink::SeriesSink;
use dogwire::sinks::Statsd;
use dogwire::transport::LineSender;

struct Nop;

impl LineSender for Nop {
    fn send_lines(&mut self, _: &[String]) -> Result<(), Error> {
        Ok(())
    }
}

fn experiment() {
    let points: Vec<Point> = (0..8)
        .map(|i| Point {
            time: 1317652676 + i,
            value: i as f64,
        })
        .collect();
    let batch = vec![
        Series::new("zrth", points.clone()),
        Series::new("fst", points.clone()).kind(MetricKind::Counter),
        Series::new("snd", points.clone())
            .kind(MetricKind::Counter)
            .sample_rate("0.1"),
        Series::new("thd", points.clone()).kind(MetricKind::Timer),
        Series::new("fth", points).kind(MetricKind::Timer).unit("s"),
    ];

    let mut sink = Statsd::new(Nop, ResponseMode::Raw);
    sink.send(&batch).unwrap();
}

fn benchmark(c: &mut Criterion) {
    c.bench_function("encode_statsd_lines", |b| {
        b.iter(|| experiment());
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
