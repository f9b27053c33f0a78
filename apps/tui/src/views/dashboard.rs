use crate::api::endpoints::STOCK_FORECAST_PATH;
use crate::api::MarineBackend;
use crate::domain::{Loaded, PlotDocument};
use crate::fallback::real_or_mock;
use crate::mock;
use crate::views::slot::Slot;
use rand::Rng;

#[derive(Debug, Default)]
pub struct DashboardView {
    pub forecast: Slot<PlotDocument>,
}

impl DashboardView {
    pub const fn new() -> Self {
        Self {
            forecast: Slot::new(),
        }
    }

    pub fn reset(&mut self) {
        self.forecast.clear();
    }

    pub const fn is_settled(&self) -> bool {
        !self.forecast.is_loading()
    }
}

pub async fn load_stock_forecast<B, R>(backend: &B, rng: &mut R) -> Loaded<PlotDocument>
where
    B: MarineBackend + ?Sized,
    R: Rng + Send + ?Sized,
{
    real_or_mock(
        "stock forecast",
        STOCK_FORECAST_PATH,
        backend.stock_forecast(),
        || mock::stock_forecast(rng),
    )
    .await
}
