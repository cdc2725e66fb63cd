#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod memory;
mod redis;

pub use self::{memory::MemoryStore, redis::RedisStore};
