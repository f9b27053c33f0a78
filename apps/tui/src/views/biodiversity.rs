use crate::api::endpoints::EDNA_ANALYZE_PATH;
use crate::api::MarineBackend;
use crate::domain::{invasive_alert_text, EdnaReport, Loaded};
use crate::fallback::real_or_mock;
use crate::mock;
use crate::upload::{UploadSlot, UploadedFile};
use crate::views::slot::Slot;

#[derive(Debug, Default)]
pub struct BiodiversityView {
    pub report: Slot<EdnaReport>,
    upload: UploadSlot,
}

impl BiodiversityView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: UploadedFile) {
        self.report.clear();
        self.upload.select(file);
    }

    pub const fn file(&self) -> Option<&UploadedFile> {
        self.upload.file()
    }

    /// Banner text for the current report, if it flags anything.
    pub fn alert(&self) -> Option<String> {
        self.report
            .ready()
            .and_then(|loaded| loaded.data.invasive_alert())
            .map(invasive_alert_text)
    }

    pub fn reset(&mut self) {
        self.report.clear();
        self.upload = UploadSlot::new();
    }

    pub const fn is_settled(&self) -> bool {
        !self.report.is_loading()
    }
}

pub async fn analyze<B>(backend: &B, file: &UploadedFile) -> Loaded<EdnaReport>
where
    B: MarineBackend + ?Sized,
{
    real_or_mock(
        "eDNA analysis",
        EDNA_ANALYZE_PATH,
        backend.analyze_edna(file),
        mock::edna_report,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_report_raises_tilapia_alert() {
        let mut view = BiodiversityView::new();
        let ticket = view.report.begin();
        view.report.resolve(ticket, Loaded::mock(mock::edna_report()));

        let alert = view.alert().unwrap();
        assert!(alert.contains("Nile Tilapia"));
        assert!(alert.contains("SEQ_003"));
    }

    #[test]
    fn new_upload_clears_previous_report() {
        let mut view = BiodiversityView::new();
        let ticket = view.report.begin();
        view.report.resolve(ticket, Loaded::mock(mock::edna_report()));

        view.select_file(UploadedFile::from_bytes("reads.fasta", b">a\nACGT\n".to_vec()));
        assert!(view.report.is_empty());
        assert!(view.alert().is_none());
        assert_eq!(view.file().unwrap().name, "reads.fasta");
    }
}
