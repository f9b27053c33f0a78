use crate::domain::{AxisLabel, PlotDocument, PlotLayout, PlotSeries};
use crate::mock::jitter;
use rand::Rng;

pub const FIRST_YEAR: i32 = 2000;
pub const LAST_OBSERVED_YEAR: i32 = 2020;
pub const LAST_FORECAST_YEAR: i32 = 2030;

const OBSERVED_JITTER: f64 = 1.0;
const OBSERVED_FLOOR: f64 = 50.0;

/// Noise-free stock growth: `55 + 0.6·t + 0.22·t²` with `t` years since 2000.
pub fn growth_curve(year: i32) -> f64 {
    let t = f64::from(year - FIRST_YEAR);
    0.22f64.mul_add(t * t, 0.6f64.mul_add(t, 55.0))
}

/// Observed markers for 2000..=2020 and the forecast line for 2000..=2030.
pub fn stock_forecast<R: Rng + ?Sized>(rng: &mut R) -> PlotDocument {
    let observed_years: Vec<i32> = (FIRST_YEAR..=LAST_OBSERVED_YEAR).collect();
    let observed = observed_years
        .iter()
        .map(|&year| (growth_curve(year) + jitter(rng, OBSERVED_JITTER)).max(OBSERVED_FLOOR))
        .collect();

    let forecast_years: Vec<i32> = (FIRST_YEAR..=LAST_FORECAST_YEAR).collect();
    let forecast = forecast_years.iter().map(|&year| growth_curve(year)).collect();

    let actual = PlotSeries::new(
        "Actual Stock",
        observed_years.into_iter().map(AxisLabel::from).collect(),
        observed,
    )
    .with_mode("markers")
    .with_color("black");

    let projected = PlotSeries::new(
        "Forecast",
        forecast_years.into_iter().map(AxisLabel::from).collect(),
        forecast,
    )
    .with_mode("lines")
    .with_color("blue");

    PlotDocument::new(
        vec![actual, projected],
        PlotLayout::titled("Fish Stock Forecast", "Year", "Stock Quantity"),
    )
}
