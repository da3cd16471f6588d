//! Lorelink Engine library.
//!
//! Loads 5etools-style reference data, memoizes it per category and resolves
//! `(kind, name, source)` lookups into typed domain entities.
//!
//! ## Structure
//!
//! - `infrastructure/` - Data source port, adapters, layout and catalog
//! - `use_cases/` - Reference resolution
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures shared by unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
