//! End-to-end tooltip tests.
//!
//! Reference data on disk (tempfile) -> `FileDataSource` -> engine `App` ->
//! `EngineReferenceLookup` -> `TooltipService`, with the recording popup host
//! and manual timers standing in for the UI shell.
//!
//! ```bash
//! cargo test -p lorelink-player --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
