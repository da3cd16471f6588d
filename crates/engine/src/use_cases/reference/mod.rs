//! Reference resolution use cases.
//!
//! Turns `(kind, name, source)` lookups into typed entities, backed by the
//! memoized catalog.

mod resolver;

pub use resolver::ReferenceResolver;
