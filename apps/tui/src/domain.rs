//! Shapes shared by the backend, the mock generators and the screens.
//!
//! Both data sources produce exactly these types, so nothing downstream of an
//! orchestrator can tell real data from mock data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which source filled a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Real,
    Mock,
}

impl Origin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Mock => "mock",
        }
    }
}

/// A value together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loaded<T> {
    pub data: T,
    pub origin: Origin,
    /// Endpoint path that answered, or `"mock"`.
    pub source: String,
}

impl<T> Loaded<T> {
    pub fn real(data: T, source: impl Into<String>) -> Self {
        Self {
            data,
            origin: Origin::Real,
            source: source.into(),
        }
    }

    pub fn mock(data: T) -> Self {
        Self {
            data,
            origin: Origin::Mock,
            source: "mock".to_string(),
        }
    }

    pub const fn is_mock(&self) -> bool {
        matches!(self.origin, Origin::Mock)
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthParameter {
    Chlorophyll,
    Ph,
    Salinity,
    Combined,
}

impl DepthParameter {
    pub const ALL: [Self; 4] = [Self::Chlorophyll, Self::Ph, Self::Salinity, Self::Combined];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chlorophyll => "chlorophyll",
            Self::Ph => "ph",
            Self::Salinity => "salinity",
            Self::Combined => "combined",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Chlorophyll),
            1 => Some(Self::Ph),
            2 => Some(Self::Salinity),
            3 => Some(Self::Combined),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Chlorophyll => 0,
            Self::Ph => 1,
            Self::Salinity => 2,
            Self::Combined => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Chlorophyll => "Chlorophyll",
            Self::Ph => "pH",
            Self::Salinity => "Salinity",
            Self::Combined => "Combined",
        }
    }
}

/// An x value: plot documents mix category labels, dates and plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisLabel {
    Number(f64),
    Text(String),
}

impl AxisLabel {
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) if value.fract() == 0.0 => write!(f, "{value:.0}"),
            Self::Number(value) => write!(f, "{value:.2}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for AxisLabel {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for AxisLabel {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for AxisLabel {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AxisLabel {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn deserialize_gaps<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

/// One trace of a chart. `x` and `y` always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    #[serde(default)]
    pub x: Vec<AxisLabel>,
    /// Gaps (`null`) are kept as NaN so points stay aligned with `x`.
    #[serde(default, deserialize_with = "deserialize_gaps")]
    pub y: Vec<f64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Remaining style hints (`line`, `marker`, `type`, ...) kept verbatim.
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

impl PlotSeries {
    pub fn new(name: impl Into<String>, x: Vec<AxisLabel>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self {
            x,
            y,
            name: name.into(),
            mode: None,
            style: Map::new(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: &str) -> Self {
        self.style
            .insert("line".to_string(), serde_json::json!({ "color": color }));
        self
    }

    pub fn color(&self) -> Option<&str> {
        ["line", "marker"]
            .iter()
            .find_map(|key| self.style.get(*key)?.get("color")?.as_str())
    }

    /// Marker-only traces render as scatter points, everything else as lines.
    pub fn is_scatter(&self) -> bool {
        self.mode
            .as_deref()
            .is_some_and(|mode| mode.contains("markers") && !mode.contains("lines"))
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleSpec {
    Text(String),
    Rich {
        #[serde(default)]
        text: Option<String>,
    },
}

impl TitleSpec {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich { text } => text.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autorange: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AxisSpec {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(TitleSpec::Text(title.to_string())),
            ..Self::default()
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.autorange.as_ref().and_then(Value::as_str) == Some("reversed")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlotLayout {
    pub fn titled(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: Some(TitleSpec::Text(title.to_string())),
            xaxis: Some(AxisSpec::titled(x_title)),
            yaxis: Some(AxisSpec::titled(y_title)),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_reversed_y(mut self) -> Self {
        self.yaxis.get_or_insert_with(AxisSpec::default).autorange =
            Some(Value::String("reversed".to_string()));
        self
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(TitleSpec::text)
    }

    pub fn x_title(&self) -> Option<&str> {
        self.xaxis.as_ref()?.title.as_ref()?.text()
    }

    pub fn y_title(&self) -> Option<&str> {
        self.yaxis.as_ref()?.title.as_ref()?.text()
    }

    pub fn y_reversed(&self) -> bool {
        self.yaxis.as_ref().is_some_and(AxisSpec::is_reversed)
    }
}

/// One chart: a set of series plus display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotDocument {
    #[serde(default)]
    pub data: Vec<PlotSeries>,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl PlotDocument {
    pub const fn new(data: Vec<PlotSeries>, layout: PlotLayout) -> Self {
        Self { data, layout }
    }

    /// Rejects documents with a series whose x and y lengths differ.
    pub fn validate(&self) -> Result<(), String> {
        match self.data.iter().find(|series| series.x.len() != series.y.len()) {
            Some(series) => Err(format!(
                "series '{}' has {} x values but {} y values",
                series.name,
                series.x.len(),
                series.y.len()
            )),
            None => Ok(()),
        }
    }

    pub fn series(&self, name: &str) -> Option<&PlotSeries> {
        self.data.iter().find(|series| series.name == name)
    }
}

/// The depth-profile endpoint answers either bare or wrapped in `plot_data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DepthProfileResponse {
    Wrapped {
        plot_data: PlotDocument,
        #[serde(default)]
        title: Option<String>,
    },
    Bare(PlotDocument),
}

impl DepthProfileResponse {
    pub fn into_document(self) -> PlotDocument {
        match self {
            Self::Wrapped {
                mut plot_data,
                title,
            } => {
                if plot_data.layout.title_text().is_none() {
                    plot_data.layout.title = title.map(TitleSpec::Text);
                }
                plot_data
            }
            Self::Bare(document) => document,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub species: String,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfidenceValue {
    Number(f64),
    Text(String),
}

impl ConfidenceValue {
    /// Numbers become `"82.13%"`; strings are already formatted upstream.
    pub fn formatted(&self) -> String {
        match self {
            Self::Number(value) => format_percent(*value),
            Self::Text(text) => text.clone(),
        }
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Classification body as the various backend routes spell it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub predicted_class: Option<String>,
    pub confidence: ConfidenceValue,
}

impl RawClassification {
    pub fn into_result(self) -> Result<ClassificationResult, String> {
        let species = self
            .species
            .or(self.predicted_class)
            .filter(|species| !species.trim().is_empty())
            .ok_or_else(|| "classification response names no species".to_string())?;

        Ok(ClassificationResult {
            species,
            confidence: self.confidence.formatted(),
        })
    }
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    // The analysis service reports fractions, the web client used percentages.
    if (0.0..=1.0).contains(&value) {
        Ok(value * 100.0)
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdnaHit {
    #[serde(rename = "sequenceId", alias = "sequence_id", default)]
    pub sequence_id: String,
    #[serde(alias = "predicted_species")]
    pub species: String,
    #[serde(default, deserialize_with = "deserialize_percent")]
    pub confidence: f64,
    #[serde(default)]
    pub invasive: bool,
    #[serde(
        rename = "commonName",
        alias = "common_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EdnaHit {
    pub fn new(sequence_id: &str, species: &str, confidence: f64, invasive: bool) -> Self {
        Self {
            sequence_id: sequence_id.to_string(),
            species: species.to_string(),
            confidence,
            invasive,
            common_name: None,
            status: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(&self.species)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdnaReport {
    #[serde(default)]
    pub detected_species: Vec<EdnaHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invasive_species: Option<Vec<EdnaHit>>,
}

impl EdnaReport {
    /// Entries of the server's invasive subset are invasive by definition,
    /// and so are detected hits naming the same species.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let Some(invasive) = self.invasive_species.as_mut() {
            for hit in invasive.iter_mut() {
                hit.invasive = true;
            }
            for hit in &mut self.detected_species {
                if invasive.iter().any(|flagged| flagged.species == hit.species) {
                    hit.invasive = true;
                }
            }
        }
        self
    }

    /// The hit the invasive banner reports: the head of the server subset
    /// when there is one, otherwise the first flagged hit in sequence order.
    pub fn invasive_alert(&self) -> Option<&EdnaHit> {
        if let Some(first) = self.invasive_species.as_ref().and_then(|list| list.first()) {
            return Some(first);
        }
        self.detected_species.iter().find(|hit| hit.invasive)
    }
}

pub fn invasive_alert_text(hit: &EdnaHit) -> String {
    if hit.sequence_id.is_empty() {
        format!("Invasive species detected: {}", hit.display_name())
    } else {
        format!(
            "Invasive species detected: {} (sequence {})",
            hit.display_name(),
            hit.sequence_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityMetrics {
    pub current_stock: i64,
    pub stock_change_percent: f64,
    pub exploitation_rate: f64,
    pub sustainability_status: String,
    pub recommendation: String,
    pub trend: String,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// What the terminal can show of the health-check chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckImage {
    pub byte_len: usize,
    pub width: u32,
    pub height: u32,
}

impl HealthCheckImage {
    /// Reads dimensions from the IHDR chunk; anything that is not a PNG is refused.
    pub fn from_png(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
            return Err("health-check body is not a PNG image".to_string());
        }
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);

        Ok(Self {
            byte_len: bytes.len(),
            width,
            height,
        })
    }
}
