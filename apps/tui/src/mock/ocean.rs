use crate::domain::{AxisLabel, DepthParameter, PlotDocument, PlotLayout, PlotSeries};
use crate::mock::jitter;
use rand::Rng;
use std::f64::consts::TAU;

const SST_START_YEAR: usize = 2020;
pub const SST_OBSERVED_MONTHS: usize = 60;
pub const SST_FORECAST_MONTHS: usize = 18;

const SST_BASELINE: f64 = 20.0;
const SST_SEASONAL_AMPLITUDE: f64 = 6.0;
const SST_TREND_PER_MONTH: f64 = 0.02;
const SST_OBSERVED_NOISE: f64 = 0.3;
const SST_FORECAST_NOISE: f64 = 0.15;
/// Shifts the sine so its crest lands on August (0-based month 7).
const SST_PHASE_MONTHS: f64 = 4.0;

pub const MAX_DEPTH_M: u32 = 900;
pub const DEPTH_STEP_M: u32 = 10;

const CHLOROPHYLL_PEAK_DEPTH: f64 = 80.0;
const CHLOROPHYLL_PEAK: f64 = 0.8;
const CHLOROPHYLL_WIDTH: f64 = 25.0;
const CHLOROPHYLL_BASELINE: f64 = 0.05;
const CHLOROPHYLL_NOISE: f64 = 0.02;

const PH_SURFACE: f64 = 6.0;
const PH_BOTTOM: f64 = 8.1;
const PH_NOISE: f64 = 0.05;
pub const PH_RANGE: (f64, f64) = (5.5, 9.0);

const SALINITY_SURFACE: f64 = 34.8;
const SALINITY_BOTTOM: f64 = 35.0;
const SALINITY_NOISE: f64 = 0.02;
pub const SALINITY_RANGE: (f64, f64) = (33.0, 35.5);
/// `(top, bottom, drop)` bands of fresher water.
const SALINITY_ANOMALIES: [(f64, f64, f64); 3] =
    [(820.0, 860.0, 0.9), (740.0, 780.0, 0.7), (380.0, 420.0, 0.5)];

fn month_label(index: usize) -> String {
    format!("{}-{:02}", SST_START_YEAR + index / 12, index % 12 + 1)
}

/// Noise-free monthly temperature for month `index` counted from 2020-01.
pub fn sst_baseline(index: usize) -> f64 {
    let month = (index % 12) as f64;
    let seasonal = SST_SEASONAL_AMPLITUDE * (TAU * (month - SST_PHASE_MONTHS) / 12.0).sin();
    SST_TREND_PER_MONTH.mul_add(index as f64, SST_BASELINE + seasonal)
}

/// Five years of monthly observations followed by an 18-month forecast.
pub fn sst_forecast<R: Rng + ?Sized>(rng: &mut R) -> PlotDocument {
    let observed_range = 0..SST_OBSERVED_MONTHS;
    let forecast_range = SST_OBSERVED_MONTHS..SST_OBSERVED_MONTHS + SST_FORECAST_MONTHS;

    let observed = PlotSeries::new(
        "Observed SST",
        observed_range.clone().map(|i| AxisLabel::from(month_label(i))).collect(),
        observed_range
            .map(|i| sst_baseline(i) + jitter(rng, SST_OBSERVED_NOISE))
            .collect(),
    )
    .with_mode("lines")
    .with_color("teal");

    let forecast = PlotSeries::new(
        "Forecast SST",
        forecast_range.clone().map(|i| AxisLabel::from(month_label(i))).collect(),
        forecast_range
            .map(|i| sst_baseline(i) + jitter(rng, SST_FORECAST_NOISE))
            .collect(),
    )
    .with_mode("lines")
    .with_color("orange");

    PlotDocument::new(
        vec![observed, forecast],
        PlotLayout::titled("Sea Surface Temperature Forecast", "Month", "SST (°C)"),
    )
}

/// Parallel columns sampled every 10 m from the surface to 900 m.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthProfile {
    pub depths: Vec<f64>,
    pub chlorophyll: Vec<f64>,
    pub ph: Vec<f64>,
    pub salinity: Vec<f64>,
}

fn salinity_drop(depth: f64) -> f64 {
    SALINITY_ANOMALIES
        .iter()
        .filter(|(top, bottom, _)| (*top..=*bottom).contains(&depth))
        .map(|(_, _, drop)| drop)
        .sum()
}

pub fn depth_profile<R: Rng + ?Sized>(rng: &mut R) -> DepthProfile {
    let depths: Vec<f64> = (0..=MAX_DEPTH_M)
        .step_by(DEPTH_STEP_M as usize)
        .map(f64::from)
        .collect();
    let max_depth = f64::from(MAX_DEPTH_M);

    let mut chlorophyll = Vec::with_capacity(depths.len());
    let mut ph = Vec::with_capacity(depths.len());
    let mut salinity = Vec::with_capacity(depths.len());

    for &depth in &depths {
        let offset = depth - CHLOROPHYLL_PEAK_DEPTH;
        let bloom = CHLOROPHYLL_PEAK
            * (-(offset * offset) / (2.0 * CHLOROPHYLL_WIDTH * CHLOROPHYLL_WIDTH)).exp();
        chlorophyll.push((CHLOROPHYLL_BASELINE + bloom + jitter(rng, CHLOROPHYLL_NOISE)).max(0.0));

        let fraction = depth / max_depth;
        let ph_value = (PH_BOTTOM - PH_SURFACE).mul_add(fraction, PH_SURFACE) + jitter(rng, PH_NOISE);
        ph.push(ph_value.clamp(PH_RANGE.0, PH_RANGE.1));

        let salinity_value = (SALINITY_BOTTOM - SALINITY_SURFACE).mul_add(fraction, SALINITY_SURFACE)
            + jitter(rng, SALINITY_NOISE)
            - salinity_drop(depth);
        salinity.push(salinity_value.clamp(SALINITY_RANGE.0, SALINITY_RANGE.1));
    }

    DepthProfile {
        depths,
        chlorophyll,
        ph,
        salinity,
    }
}

impl DepthProfile {
    pub fn index_of(&self, depth: f64) -> Option<usize> {
        self.depths
            .iter()
            .position(|&sample| (sample - depth).abs() < f64::EPSILON)
    }

    fn series(&self, name: &str, values: &[f64], color: &str) -> PlotSeries {
        PlotSeries::new(
            name,
            values.iter().copied().map(AxisLabel::from).collect(),
            self.depths.clone(),
        )
        .with_mode("lines")
        .with_color(color)
    }

    /// Value on x, depth on a reversed y axis, as the profile endpoint draws it.
    pub fn into_document(self, parameter: DepthParameter) -> PlotDocument {
        let chlorophyll = || self.series("Chlorophyll (mg/m³)", &self.chlorophyll, "green");
        let ph = || self.series("pH", &self.ph, "purple");
        let salinity = || self.series("Salinity (PSU)", &self.salinity, "blue");

        let (data, x_title) = match parameter {
            DepthParameter::Chlorophyll => (vec![chlorophyll()], "Chlorophyll (mg/m³)"),
            DepthParameter::Ph => (vec![ph()], "pH"),
            DepthParameter::Salinity => (vec![salinity()], "Salinity (PSU)"),
            DepthParameter::Combined => (vec![chlorophyll(), ph(), salinity()], "Value"),
        };

        let title = format!("Ocean Depth vs {}", parameter.label());
        PlotDocument::new(
            data,
            PlotLayout::titled(&title, x_title, "Depth (m)").with_reversed_y(),
        )
    }
}
