//! Infrastructure implementations.
//!
//! The data source port, its adapters, and the memoized catalog built on top.

pub mod catalog;
pub mod data_sources;
pub mod layout;
pub mod ports;
pub mod settings;
