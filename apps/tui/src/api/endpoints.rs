use crate::api::client::{ApiClient, Params};
use crate::api::error::RequestError;
use crate::domain::{
    ClassificationResult, DepthParameter, DepthProfileResponse, EdnaReport, HealthCheckImage,
    PlotDocument, RawClassification, SustainabilityMetrics,
};
use crate::upload::UploadedFile;
use async_trait::async_trait;
use serde::Serialize;

pub const STOCK_FORECAST_PATH: &str = "/forecast_interactive";
pub const SST_FORECAST_PATH: &str = "/api/v1/forecast";
pub const DEPTH_PROFILE_PATH: &str = "/api/v1/ocean/depth-profile";
pub const HEALTH_CHECK_PATH: &str = "/health-check";
pub const STOCK_METRICS_PATH: &str = "/api/v1/fish/stock/metrics";
pub const EDNA_ANALYZE_PATH: &str = "/api/v1/edna/analyze";

/// Classification routes in the order they are tried.
pub const CLASSIFY_ROUTES: [&str; 3] = [
    "/predict/fish_species",
    "/classify/fish",
    "/api/v1/fish/classify",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastRequest {
    pub use_default_data: bool,
    pub format: String,
    pub future_days: u32,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            use_default_data: true,
            format: "future_interactive".to_string(),
            future_days: 540,
        }
    }
}

impl ForecastRequest {
    fn params(&self) -> Params {
        Params::new()
            .with("use_default_data", self.use_default_data)
            .with("format", &self.format)
            .with("future_days", self.future_days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthProfileRequest {
    pub use_default_data: bool,
    pub parameter: DepthParameter,
    pub format: String,
}

impl DepthProfileRequest {
    pub fn interactive(parameter: DepthParameter) -> Self {
        Self {
            use_default_data: true,
            parameter,
            format: "interactive".to_string(),
        }
    }

    fn params(&self) -> Params {
        Params::new()
            .with("use_default_data", self.use_default_data)
            .with("parameter", self.parameter.as_str())
            .with("format", &self.format)
    }
}

/// The analytics service as the dashboard sees it.
#[async_trait]
pub trait MarineBackend: Send + Sync {
    async fn stock_forecast(&self) -> Result<PlotDocument, RequestError>;

    async fn sst_forecast(&self, request: &ForecastRequest) -> Result<PlotDocument, RequestError>;

    async fn depth_profile(
        &self,
        request: &DepthProfileRequest,
    ) -> Result<PlotDocument, RequestError>;

    async fn classify_fish(
        &self,
        route: &str,
        file: &UploadedFile,
    ) -> Result<ClassificationResult, RequestError>;

    async fn health_check(&self) -> Result<HealthCheckImage, RequestError>;

    async fn stock_metrics(&self) -> Result<SustainabilityMetrics, RequestError>;

    async fn analyze_edna(&self, file: &UploadedFile) -> Result<EdnaReport, RequestError>;
}

fn checked(document: PlotDocument, path: &str) -> Result<PlotDocument, RequestError> {
    document
        .validate()
        .map_err(|reason| RequestError::parse(path, reason))?;
    Ok(document)
}

// The FastAPI service reads request options from the query string; the JSON
// body carries the same fields for deployments that read the body.
#[async_trait]
impl MarineBackend for ApiClient {
    async fn stock_forecast(&self) -> Result<PlotDocument, RequestError> {
        let document = self.get_json(STOCK_FORECAST_PATH, None).await?;
        checked(document, STOCK_FORECAST_PATH)
    }

    async fn sst_forecast(&self, request: &ForecastRequest) -> Result<PlotDocument, RequestError> {
        let params = request.params();
        let document = self
            .post_json(SST_FORECAST_PATH, Some(&params), Some(request))
            .await?;
        checked(document, SST_FORECAST_PATH)
    }

    async fn depth_profile(
        &self,
        request: &DepthProfileRequest,
    ) -> Result<PlotDocument, RequestError> {
        let params = request.params();
        let response: DepthProfileResponse = self
            .post_json(DEPTH_PROFILE_PATH, Some(&params), Some(request))
            .await?;
        checked(response.into_document(), DEPTH_PROFILE_PATH)
    }

    async fn classify_fish(
        &self,
        route: &str,
        file: &UploadedFile,
    ) -> Result<ClassificationResult, RequestError> {
        let raw: RawClassification = self.post_form_data(route, None, file.to_form()).await?;
        raw.into_result()
            .map_err(|reason| RequestError::parse(route, reason))
    }

    async fn health_check(&self) -> Result<HealthCheckImage, RequestError> {
        let bytes = self.get_bytes(HEALTH_CHECK_PATH, None).await?;
        HealthCheckImage::from_png(&bytes)
            .map_err(|reason| RequestError::parse(HEALTH_CHECK_PATH, reason))
    }

    async fn stock_metrics(&self) -> Result<SustainabilityMetrics, RequestError> {
        let params = Params::new().with("use_default_data", true);
        self.get_json(STOCK_METRICS_PATH, Some(&params)).await
    }

    async fn analyze_edna(&self, file: &UploadedFile) -> Result<EdnaReport, RequestError> {
        let report: EdnaReport = self
            .post_form_data(EDNA_ANALYZE_PATH, None, file.to_form())
            .await?;
        Ok(report.normalized())
    }
}
