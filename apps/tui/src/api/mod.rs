// Backend access: URL assembly, JSON/multipart transport and typed endpoints

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, Params};
pub use endpoints::{DepthProfileRequest, ForecastRequest, MarineBackend, CLASSIFY_ROUTES};
pub use error::RequestError;
