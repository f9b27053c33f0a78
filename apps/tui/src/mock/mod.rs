//! Locally synthesised stand-ins for every backend response.
//!
//! Each generator returns exactly the shape of the endpoint it replaces.
//! Randomness comes from the caller so tests can seed it.

pub mod edna;
pub mod fisheries;
pub mod forecast;
pub mod ocean;

pub use edna::edna_report;
pub use fisheries::{stock_metrics, FishClassifierMock};
pub use forecast::stock_forecast;
pub use ocean::{depth_profile, sst_forecast, DepthProfile};

use rand::Rng;

/// Uniform noise in `[-bound, bound]`.
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-bound..=bound)
}
