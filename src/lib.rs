//! Dogwire is a metric submission client. It accepts measurements in the
//! shapes applications find convenient -- a bare number, a single
//! timestamp/value pair or a full series of pairs -- and translates them
//! into the wire format of one of two very different backends: a batched
//! JSON HTTP API which groups many timestamped points into a single
//! request, and the statsd line protocol which has no timestamp concept at
//! all and carries one value per line.
//!
//! The interesting work is the translation, not the network call. Callers
//! talk to a single `client::Client` and never learn which backend is
//! plugged in; the backends each implement `sink::SeriesSink` and take
//! responsibility for reconciling their protocol's data model with the
//! caller's.
//!
//! Dogwire makes no delivery guarantees. Every submission is a
//! synchronous, best-effort, one-shot translate-and-send. There is no
//! retry, no buffering and no flush schedule at this layer.
#![deny(trivial_numeric_casts, missing_docs, unstable_features, unused_import_braces)]
extern crate chrono;
extern crate serde;
extern crate thiserror;
extern crate toml;
extern crate ureq;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate serde_json;

pub mod client;
pub mod config;
pub mod error;
pub mod metric;
pub mod sink;
pub mod sinks;
pub mod time;
pub mod transport;
