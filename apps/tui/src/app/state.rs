use crate::app::actions::{AppActions, FetchOutcome};
use chrono::{DateTime, Local};
use log::info;
use ocean_dash::domain::{DepthParameter, Loaded};
use ocean_dash::upload::UploadedFile;
use ocean_dash::views::{BiodiversityView, DashboardView, FisheriesView, OceanView, Slot};
use std::time::Instant;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Ocean,
    Fisheries,
    Biodiversity,
}

impl View {
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Ocean, Self::Fisheries, Self::Biodiversity];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Ocean => "ocean",
            Self::Fisheries => "fisheries",
            Self::Biodiversity => "biodiversity",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Dashboard),
            1 => Some(Self::Ocean),
            2 => Some(Self::Fisheries),
            3 => Some(Self::Biodiversity),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Ocean => 1,
            Self::Fisheries => 2,
            Self::Biodiversity => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Ocean => "Ocean Data",
            Self::Fisheries => "Fisheries",
            Self::Biodiversity => "Biodiversity",
        }
    }

    /// Views that take an uploaded file.
    pub const fn accepts_upload(self) -> bool {
        matches!(self, Self::Fisheries | Self::Biodiversity)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputState {
    Browsing,
    EnteringPath,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: View,
    pub input_state: InputState,
    pub current_input: String,
    pub status_message: String,
    pub show_help: bool,
    pub animation_counter: f64,
    pub animation_paused: bool,
    pub last_frame: Instant,
    pub last_update: Option<DateTime<Local>>,
    pub edna_selection_index: usize,
    pub dashboard: DashboardView,
    pub ocean: OceanView,
    pub fisheries: FisheriesView,
    pub biodiversity: BiodiversityView,
    pub actions: AppActions,
    outcomes: UnboundedReceiver<FetchOutcome>,
}

impl App {
    pub fn new(actions: AppActions, outcomes: UnboundedReceiver<FetchOutcome>) -> Self {
        Self {
            running: true,
            view: View::Dashboard,
            input_state: InputState::Browsing,
            current_input: String::new(),
            status_message: String::new(),
            show_help: false,
            animation_counter: 0.0,
            animation_paused: false,
            last_frame: Instant::now(),
            last_update: None,
            edna_selection_index: 0,
            dashboard: DashboardView::new(),
            ocean: OceanView::new(),
            fisheries: FisheriesView::new(),
            biodiversity: BiodiversityView::new(),
            actions,
            outcomes,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.animation_paused {
            return;
        }

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    pub fn toggle_animation_pause(&mut self) {
        self.animation_paused = !self.animation_paused;
        self.last_frame = Instant::now();
    }

    /// Leaves the current view and mounts `view`. Leaving drops the view's
    /// state, so anything still in flight for it is discarded on arrival.
    pub fn navigate(&mut self, view: View) {
        if view == self.view {
            return;
        }
        self.unmount(self.view);
        self.view = view;
        self.input_state = InputState::Browsing;
        self.current_input.clear();
        self.mount(view);
    }

    /// Starts every load a freshly shown view performs.
    pub fn mount(&mut self, view: View) {
        info!("mounting {} view", view.as_str());
        match view {
            View::Dashboard => {
                let ticket = self.dashboard.forecast.begin();
                self.actions.load_stock_forecast(ticket);
            }
            View::Ocean => {
                let ticket = self.ocean.sst.begin();
                self.actions.load_sst_forecast(ticket);
                self.reload_depth_profile();
            }
            View::Fisheries => {
                let ticket = self.fisheries.health.begin();
                self.actions.load_health_check(ticket);
                let ticket = self.fisheries.metrics.begin();
                self.actions.load_stock_metrics(ticket);
            }
            // Nothing to show until a sample is uploaded
            View::Biodiversity => {}
        }
    }

    pub fn unmount(&mut self, view: View) {
        match view {
            View::Dashboard => self.dashboard.reset(),
            View::Ocean => self.ocean.reset(),
            View::Fisheries => self.fisheries.reset(),
            View::Biodiversity => {
                self.biodiversity.reset();
                self.edna_selection_index = 0;
            }
        }
    }

    /// Remounts the current view. Fisheries keeps its image and its
    /// classification; only the health check and metrics are fetched again.
    pub fn refresh(&mut self) {
        let view = self.view;
        if view != View::Fisheries {
            self.unmount(view);
        }
        self.mount(view);
        self.status_message = format!("Refreshing {}", view.label());
    }

    pub fn set_depth_parameter(&mut self, parameter: DepthParameter) {
        if self.ocean.set_parameter(parameter) {
            self.reload_depth_profile();
        }
    }

    fn reload_depth_profile(&mut self) {
        let ticket = self.ocean.depth.begin();
        self.actions
            .load_depth_profile(ticket, self.ocean.parameter());
    }

    /// Hands a newly chosen file to the current view and starts its analysis.
    pub fn submit_upload(&mut self, file: UploadedFile) {
        self.status_message = format!("Selected {} ({})", file.name, file.summary());
        match self.view {
            View::Fisheries => {
                self.fisheries.select_file(file.clone());
                let ticket = self.fisheries.classification.begin();
                self.actions.classify(ticket, file);
            }
            View::Biodiversity => {
                self.biodiversity.select_file(file.clone());
                self.edna_selection_index = 0;
                let ticket = self.biodiversity.report.begin();
                self.actions.analyze_edna(ticket, file);
            }
            View::Dashboard | View::Ocean => {
                self.status_message = format!("{} does not take uploads", self.view.label());
            }
        }
    }

    /// Classifies the held image again.
    pub fn reclassify(&mut self) {
        let Some(file) = self.fisheries.file().cloned() else {
            self.status_message = "No image selected".to_string();
            return;
        };
        let ticket = self.fisheries.classification.begin();
        self.actions.classify(ticket, file);
    }

    /// Applies every result that has arrived so far.
    pub fn drain_outcomes(&mut self) {
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => self.apply(outcome),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Waits for the next result; `false` once no sender is left.
    pub async fn wait_for_outcome(&mut self) -> bool {
        match self.outcomes.recv().await {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, outcome: FetchOutcome) {
        let (what, accepted, origin) = match outcome {
            FetchOutcome::StockForecast(ticket, loaded) => {
                let origin = describe(&loaded);
                ("Stock forecast", self.dashboard.forecast.resolve(ticket, loaded), origin)
            }
            FetchOutcome::SstForecast(ticket, loaded) => {
                let origin = describe(&loaded);
                ("SST forecast", self.ocean.sst.resolve(ticket, loaded), origin)
            }
            FetchOutcome::DepthProfile(ticket, loaded) => {
                let origin = describe(&loaded);
                ("Depth profile", self.ocean.depth.resolve(ticket, loaded), origin)
            }
            FetchOutcome::Classification(ticket, loaded) => {
                let origin = describe(&loaded);
                (
                    "Classification",
                    self.fisheries.classification.resolve(ticket, loaded),
                    origin,
                )
            }
            FetchOutcome::HealthCheck(ticket, loaded) => {
                let origin = describe(&loaded);
                ("Health check", self.fisheries.health.resolve(ticket, loaded), origin)
            }
            FetchOutcome::StockMetrics(ticket, loaded) => {
                let origin = describe(&loaded);
                ("Stock metrics", self.fisheries.metrics.resolve(ticket, loaded), origin)
            }
            FetchOutcome::Edna(ticket, loaded) => {
                let origin = describe(&loaded);
                ("eDNA analysis", self.biodiversity.report.resolve(ticket, loaded), origin)
            }
        };

        if accepted {
            self.last_update = Some(Local::now());
            self.status_message = format!("{what} loaded ({origin})");
        } else {
            log::debug!("{what}: discarding result for a restarted slot");
        }
    }

    pub const fn is_loading(&self) -> bool {
        !(self.dashboard.is_settled()
            && self.ocean.is_settled()
            && self.fisheries.is_settled()
            && self.biodiversity.is_settled())
    }

    /// Releases held uploads before exit.
    pub fn shutdown(&mut self) {
        self.fisheries.release();
    }
}

fn describe<T>(loaded: &Loaded<T>) -> String {
    if loaded.is_mock() {
        "mock data".to_string()
    } else {
        format!("live from {}", loaded.source)
    }
}

/// Label shown beside a slot: where its data came from, if it has any.
pub fn slot_source<T>(slot: &Slot<T>) -> Option<String> {
    slot.ready().map(describe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ocean_dash::api::{DepthProfileRequest, ForecastRequest};
    use ocean_dash::domain::{
        ClassificationResult, EdnaReport, HealthCheckImage, PlotDocument, SustainabilityMetrics,
    };
    use ocean_dash::mock::FishClassifierMock;
    use ocean_dash::{MarineBackend, Origin, RequestError};
    use std::sync::Arc;

    // Every call fails, so every slot ends up mocked
    struct Offline;

    fn down() -> RequestError {
        RequestError::Status {
            url: "http://offline".to_string(),
            status: 503,
        }
    }

    #[async_trait]
    impl MarineBackend for Offline {
        async fn stock_forecast(&self) -> Result<PlotDocument, RequestError> {
            Err(down())
        }
        async fn sst_forecast(&self, _: &ForecastRequest) -> Result<PlotDocument, RequestError> {
            Err(down())
        }
        async fn depth_profile(&self, _: &DepthProfileRequest) -> Result<PlotDocument, RequestError> {
            Err(down())
        }
        async fn classify_fish(
            &self,
            _: &str,
            _: &UploadedFile,
        ) -> Result<ClassificationResult, RequestError> {
            Err(down())
        }
        async fn health_check(&self) -> Result<HealthCheckImage, RequestError> {
            Err(down())
        }
        async fn stock_metrics(&self) -> Result<SustainabilityMetrics, RequestError> {
            Err(down())
        }
        async fn analyze_edna(&self, _: &UploadedFile) -> Result<EdnaReport, RequestError> {
            Err(down())
        }
    }

    fn app() -> App {
        let (actions, outcomes) =
            AppActions::new(Arc::new(Offline), Arc::new(FishClassifierMock::new()));
        App::new(actions, outcomes)
    }

    async fn settle(app: &mut App) {
        while app.is_loading() {
            assert!(app.wait_for_outcome().await);
        }
    }

    #[tokio::test]
    async fn mounting_ocean_fills_both_slots_with_mock_data() {
        let mut app = app();
        app.navigate(View::Ocean);
        settle(&mut app).await;

        assert_eq!(app.ocean.sst.ready().unwrap().origin, Origin::Mock);
        assert_eq!(app.ocean.depth.ready().unwrap().origin, Origin::Mock);
        assert!(app.last_update.is_some());
    }

    #[tokio::test]
    async fn leaving_a_view_discards_its_in_flight_results() {
        let mut app = app();
        app.mount(View::Dashboard);
        app.navigate(View::Biodiversity);

        // The dashboard result still arrives but its slot was reset
        assert!(app.wait_for_outcome().await);
        assert!(app.dashboard.forecast.is_empty());

        // A remount does not pick up results from the earlier mount
        app.navigate(View::Dashboard);
        settle(&mut app).await;
        assert!(app.dashboard.forecast.ready().is_some());
    }

    #[tokio::test]
    async fn uploads_reach_only_the_current_view() {
        let mut app = app();
        app.navigate(View::Fisheries);
        app.submit_upload(UploadedFile::from_bytes("bass.jpg", vec![0xFF, 0xD8, 0xFF, 0]));
        settle(&mut app).await;

        let result = &app.fisheries.classification.ready().unwrap().data;
        assert_eq!(result.species, "Sea Bass");
        assert!(app.biodiversity.report.is_empty());

        app.reclassify();
        settle(&mut app).await;
        let result = &app.fisheries.classification.ready().unwrap().data;
        assert_eq!(result.species, "Gilt-Head Bream");
    }

    #[tokio::test]
    async fn refreshing_fisheries_keeps_the_uploaded_image() {
        let mut app = app();
        app.navigate(View::Fisheries);
        app.submit_upload(UploadedFile::from_bytes("bass.jpg", vec![0xFF, 0xD8, 0xFF, 0]));
        settle(&mut app).await;
        let preview = app.fisheries.preview_label();

        app.refresh();
        assert!(app.fisheries.health.is_loading());
        assert!(app.fisheries.metrics.is_loading());
        settle(&mut app).await;

        assert_eq!(app.fisheries.file().map(|file| file.name.as_str()), Some("bass.jpg"));
        assert_eq!(app.fisheries.preview_label(), preview);
        let result = &app.fisheries.classification.ready().unwrap().data;
        assert_eq!(result.species, "Sea Bass");
        assert!(app.fisheries.metrics.ready().is_some());
    }

    #[test]
    fn views_round_trip_through_their_index() {
        for view in View::ALL {
            assert_eq!(View::from_index(view.index()), Some(view));
        }
        assert_eq!(View::from_index(4), None);
    }
}
