//! The single operator of the crate: `map`, with the mapping stage it drives.

pub mod map;

pub use map::{FilterMap, MappingStage};
