//! Shared contracts for the proto2args pipeline.
//!
//! This crate provides the [`Key`]/[`ArgValue`] argument representation and
//! the [`ArgSink`] trait implemented by downstream argument stores.

mod key;
mod sink;
mod value;

pub use key::Key;
pub use sink::{ArgCollector, ArgRecord, ArgSink};
pub use value::ArgValue;
