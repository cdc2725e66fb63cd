#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod client;
mod event;
mod node;

pub use self::client::Inventory;
pub use kube::Client;
