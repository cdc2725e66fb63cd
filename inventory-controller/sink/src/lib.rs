#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod collect;
mod metrics;
pub mod poller;

pub use self::{
    collect::{Collector, DataSink},
    metrics::SinkMetrics,
};
