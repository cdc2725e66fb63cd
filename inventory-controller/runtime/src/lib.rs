#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use inventory_controller_api as api;
pub use inventory_controller_cache as cache;
pub use inventory_controller_core as core;
pub use inventory_controller_k8s as k8s;
pub use inventory_controller_sink as sink;

mod args;
mod config;

pub use self::{args::Args, config::FileConfigStore};
