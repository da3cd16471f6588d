//! Use cases - lookups orchestrated over the catalog.

pub mod reference;

pub use reference::ReferenceResolver;
