//! The two submission backends.
//!
//! Both implement `sink::SeriesSink` and are selected at construction
//! time; nothing above them knows which one is wired in.

pub mod http;
pub mod statsd;

pub use self::http::HttpSeries;
pub use self::statsd::Statsd;
