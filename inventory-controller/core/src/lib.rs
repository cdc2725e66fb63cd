#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod config;
mod filter;
mod kind;
mod lister;
pub mod permissions;
mod store;
mod view;

pub use self::{
    config::{ClusterConfig, ConfigStore},
    filter::filter,
    kind::{InvalidResourceKind, ResourceKind},
    lister::ListResources,
    permissions::{Capabilities, Capability, PermissionSet},
    store::{Store, StoreError},
    view::ResourceView,
};
