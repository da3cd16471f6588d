//! Data source adapters for reference documents.

mod fallback;
mod filesystem;
mod http;

pub use fallback::FallbackDataSource;
pub use filesystem::FileDataSource;
pub use http::HttpDataSource;
