//! Contracts implemented by dataset splitters.

mod splitter;

pub use splitter::{InstanceGenerator, Splitter};
