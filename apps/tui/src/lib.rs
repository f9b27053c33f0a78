// Export our modules for use in the binary and tests
pub mod api;
pub mod config;
pub mod domain;
pub mod fallback;
pub mod logging;
pub mod mock;
pub mod upload;
pub mod views;

pub use api::{ApiClient, MarineBackend, RequestError};
pub use domain::{Loaded, Origin};
