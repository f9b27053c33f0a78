use log::debug;
use ocean_dash::domain::{
    ClassificationResult, DepthParameter, EdnaReport, Loaded, PlotDocument, SustainabilityMetrics,
};
use ocean_dash::mock::FishClassifierMock;
use ocean_dash::upload::UploadedFile;
use ocean_dash::views::{biodiversity, dashboard, fisheries, ocean, HealthPanel, Ticket};
use ocean_dash::MarineBackend;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A finished load, addressed to the slot cycle that requested it.
#[derive(Debug)]
pub enum FetchOutcome {
    StockForecast(Ticket, Loaded<PlotDocument>),
    SstForecast(Ticket, Loaded<PlotDocument>),
    DepthProfile(Ticket, Loaded<PlotDocument>),
    Classification(Ticket, Loaded<ClassificationResult>),
    HealthCheck(Ticket, Loaded<HealthPanel>),
    StockMetrics(Ticket, Loaded<SustainabilityMetrics>),
    Edna(Ticket, Loaded<EdnaReport>),
}

/// Spawns one task per load. Each task owns clones of the backend handle
/// and reports back over the channel, so view state is only touched by the
/// event loop.
pub struct AppActions {
    backend: Arc<dyn MarineBackend>,
    classifier: Arc<FishClassifierMock>,
    outcomes: UnboundedSender<FetchOutcome>,
}

impl std::fmt::Debug for AppActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppActions").finish_non_exhaustive()
    }
}

impl AppActions {
    pub fn new(
        backend: Arc<dyn MarineBackend>,
        classifier: Arc<FishClassifierMock>,
    ) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (outcomes, receiver) = unbounded_channel();
        let actions = Self {
            backend,
            classifier,
            outcomes,
        };
        (actions, receiver)
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = FetchOutcome> + Send + 'static,
    {
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = task.await;
            if outcomes.send(outcome).is_err() {
                debug!("event loop gone, dropping fetch result");
            }
        });
    }

    pub fn load_stock_forecast(&self, ticket: Ticket) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let loaded = dashboard::load_stock_forecast(backend.as_ref(), &mut rng).await;
            FetchOutcome::StockForecast(ticket, loaded)
        });
    }

    pub fn load_sst_forecast(&self, ticket: Ticket) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let loaded = ocean::load_sst_forecast(backend.as_ref(), &mut rng).await;
            FetchOutcome::SstForecast(ticket, loaded)
        });
    }

    pub fn load_depth_profile(&self, ticket: Ticket, parameter: DepthParameter) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let loaded = ocean::load_depth_profile(backend.as_ref(), parameter, &mut rng).await;
            FetchOutcome::DepthProfile(ticket, loaded)
        });
    }

    pub fn classify(&self, ticket: Ticket, file: UploadedFile) {
        let backend = Arc::clone(&self.backend);
        let classifier = Arc::clone(&self.classifier);
        self.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let loaded =
                fisheries::classify(backend.as_ref(), &file, classifier.as_ref(), &mut rng).await;
            FetchOutcome::Classification(ticket, loaded)
        });
    }

    pub fn load_health_check(&self, ticket: Ticket) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let loaded = fisheries::load_health_check(backend.as_ref()).await;
            FetchOutcome::HealthCheck(ticket, loaded)
        });
    }

    pub fn load_stock_metrics(&self, ticket: Ticket) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let loaded = fisheries::load_stock_metrics(backend.as_ref()).await;
            FetchOutcome::StockMetrics(ticket, loaded)
        });
    }

    pub fn analyze_edna(&self, ticket: Ticket, file: UploadedFile) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let loaded = biodiversity::analyze(backend.as_ref(), &file).await;
            FetchOutcome::Edna(ticket, loaded)
        });
    }
}
