use crate::api::endpoints::{DEPTH_PROFILE_PATH, SST_FORECAST_PATH};
use crate::api::{DepthProfileRequest, ForecastRequest, MarineBackend};
use crate::domain::{DepthParameter, Loaded, PlotDocument};
use crate::fallback::real_or_mock;
use crate::mock;
use crate::views::slot::Slot;
use rand::Rng;

#[derive(Debug)]
pub struct OceanView {
    pub sst: Slot<PlotDocument>,
    pub depth: Slot<PlotDocument>,
    parameter: DepthParameter,
}

impl Default for OceanView {
    fn default() -> Self {
        Self::new()
    }
}

impl OceanView {
    pub const fn new() -> Self {
        Self {
            sst: Slot::new(),
            depth: Slot::new(),
            parameter: DepthParameter::Chlorophyll,
        }
    }

    pub const fn parameter(&self) -> DepthParameter {
        self.parameter
    }

    /// Returns `true` when the depth slot must be remounted.
    pub fn set_parameter(&mut self, parameter: DepthParameter) -> bool {
        if parameter == self.parameter {
            return false;
        }
        self.parameter = parameter;
        self.depth.clear();
        true
    }

    /// Back to the state of a fresh mount. Slots keep counting generations,
    /// so results requested before the reset are still recognised as stale.
    pub fn reset(&mut self) {
        self.sst.clear();
        self.depth.clear();
        self.parameter = DepthParameter::Chlorophyll;
    }

    pub const fn is_settled(&self) -> bool {
        !self.sst.is_loading() && !self.depth.is_loading()
    }
}

pub async fn load_sst_forecast<B, R>(backend: &B, rng: &mut R) -> Loaded<PlotDocument>
where
    B: MarineBackend + ?Sized,
    R: Rng + Send + ?Sized,
{
    let request = ForecastRequest::default();
    real_or_mock(
        "sst forecast",
        SST_FORECAST_PATH,
        backend.sst_forecast(&request),
        || mock::sst_forecast(rng),
    )
    .await
}

pub async fn load_depth_profile<B, R>(
    backend: &B,
    parameter: DepthParameter,
    rng: &mut R,
) -> Loaded<PlotDocument>
where
    B: MarineBackend + ?Sized,
    R: Rng + Send + ?Sized,
{
    let request = DepthProfileRequest::interactive(parameter);
    real_or_mock(
        "depth profile",
        DEPTH_PROFILE_PATH,
        backend.depth_profile(&request),
        || mock::depth_profile(rng).into_document(parameter),
    )
    .await
}
