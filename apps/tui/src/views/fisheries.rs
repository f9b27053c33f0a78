//! Fisheries: image classification over a chain of backend routes, the
//! health-check chart, and stock sustainability figures.

use crate::api::endpoints::{HEALTH_CHECK_PATH, STOCK_METRICS_PATH};
use crate::api::{MarineBackend, CLASSIFY_ROUTES};
use crate::domain::{ClassificationResult, HealthCheckImage, Loaded, SustainabilityMetrics};
use crate::fallback::{real_or_mock, with_fallback};
use crate::mock::{self, FishClassifierMock};
use crate::upload::{Preview, PreviewRegistry, UploadSlot, UploadedFile};
use crate::views::slot::Slot;
use rand::Rng;
use serde::Serialize;

/// What the health-check panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HealthPanel {
    Image(HealthCheckImage),
    /// No chart could be fetched.
    Placeholder,
}

#[derive(Debug, Default)]
pub struct FisheriesView {
    pub classification: Slot<ClassificationResult>,
    pub health: Slot<HealthPanel>,
    pub metrics: Slot<SustainabilityMetrics>,
    upload: UploadSlot,
    previews: PreviewRegistry,
}

impl FisheriesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held image: the previous result is cleared and the old
    /// preview revoked before a new one is created.
    pub fn select_file(&mut self, file: UploadedFile) {
        self.classification.clear();
        self.upload.select_with_preview(file, &mut self.previews);
    }

    pub const fn file(&self) -> Option<&UploadedFile> {
        self.upload.file()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.upload
            .preview()
            .and_then(|handle| self.previews.get(handle))
    }

    pub fn preview_label(&self) -> Option<String> {
        self.upload.preview().map(ToString::to_string)
    }

    #[cfg(test)]
    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }

    /// Drops the held file and its preview, e.g. when the app exits.
    pub fn release(&mut self) {
        self.classification.clear();
        self.upload.release(&mut self.previews);
    }

    pub fn reset(&mut self) {
        self.release();
        self.health.clear();
        self.metrics.clear();
    }

    pub const fn is_settled(&self) -> bool {
        !self.classification.is_loading() && !self.health.is_loading() && !self.metrics.is_loading()
    }
}

/// Tries each classification route in order; the rotating mock answers when
/// none does.
pub async fn classify<B, R>(
    backend: &B,
    file: &UploadedFile,
    classifier: &FishClassifierMock,
    rng: &mut R,
) -> Loaded<ClassificationResult>
where
    B: MarineBackend + ?Sized,
    R: Rng + Send + ?Sized,
{
    with_fallback(
        "fish classification",
        &CLASSIFY_ROUTES,
        |route| backend.classify_fish(route, file),
        || classifier.next(rng),
    )
    .await
}

pub async fn load_health_check<B>(backend: &B) -> Loaded<HealthPanel>
where
    B: MarineBackend + ?Sized,
{
    real_or_mock(
        "health check",
        HEALTH_CHECK_PATH,
        async { backend.health_check().await.map(HealthPanel::Image) },
        || HealthPanel::Placeholder,
    )
    .await
}

pub async fn load_stock_metrics<B>(backend: &B) -> Loaded<SustainabilityMetrics>
where
    B: MarineBackend + ?Sized,
{
    real_or_mock(
        "stock metrics",
        STOCK_METRICS_PATH,
        backend.stock_metrics(),
        mock::stock_metrics,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_file_clears_result_and_swaps_preview() {
        let mut view = FisheriesView::new();
        view.select_file(UploadedFile::from_bytes("one.jpg", vec![0xFF, 0xD8, 0xFF, 1]));
        let ticket = view.classification.begin();
        assert!(view.classification.resolve(
            ticket,
            Loaded::mock(ClassificationResult {
                species: "Sea Bass".to_string(),
                confidence: "80.00%".to_string(),
            })
        ));
        let first = view.preview_label().unwrap();

        view.select_file(UploadedFile::from_bytes("two.jpg", vec![0xFF, 0xD8, 0xFF, 2]));

        assert!(view.classification.is_empty());
        assert_eq!(view.live_previews(), 1);
        assert_ne!(view.preview_label().unwrap(), first);
        assert_eq!(view.preview().unwrap().file_name, "two.jpg");
    }

    #[test]
    fn release_drops_everything() {
        let mut view = FisheriesView::new();
        view.select_file(UploadedFile::from_bytes("one.jpg", vec![1]));
        view.release();
        assert!(view.file().is_none());
        assert_eq!(view.live_previews(), 0);
    }
}
