use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::flags::FlagStore;
use crate::listing::board::Desk;
use crate::models::{Application, ExamResult, Job, Record, User};
use crate::notify::Notifier;
use crate::screening::Scorer;
use crate::seed;
use crate::settings::PlatformSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<Desk<Application>>,
    pub jobs: Arc<Desk<Job>>,
    pub exams: Arc<Desk<ExamResult>>,
    pub users: Arc<Desk<User>>,
    /// Pluggable scorer. Default: SimulatedScorer.
    pub scorer: Arc<dyn Scorer>,
    pub flags: Arc<dyn FlagStore>,
    pub notifier: Arc<dyn Notifier>,
    pub settings: Arc<RwLock<PlatformSettings>>,
}

impl AppState {
    /// Builds state over the mock collections. `shutdown` is cancelled on
    /// SIGTERM/SIGINT and aborts any screening still waiting on the scorer.
    pub fn seeded(
        config: &Config,
        scorer: Arc<dyn Scorer>,
        flags: Arc<dyn FlagStore>,
        notifier: Arc<dyn Notifier>,
        shutdown: &CancellationToken,
    ) -> Self {
        Self {
            applications: Arc::new(Desk::new(
                seed::applications(),
                config.applications_page_size,
                shutdown.child_token(),
            )),
            jobs: Arc::new(Desk::new(
                seed::jobs(),
                config.jobs_page_size,
                shutdown.child_token(),
            )),
            exams: Arc::new(Desk::new(
                seed::exam_results(),
                config.exams_page_size,
                shutdown.child_token(),
            )),
            users: Arc::new(Desk::new(
                seed::users(),
                config.users_page_size,
                shutdown.child_token(),
            )),
            scorer,
            flags,
            notifier,
            settings: Arc::new(RwLock::new(PlatformSettings::default())),
        }
    }
}

/// Lets board handlers be written once, generic over the record type.
pub trait HasDesk<R: Record> {
    fn desk(&self) -> &Desk<R>;
}

impl HasDesk<Application> for AppState {
    fn desk(&self) -> &Desk<Application> {
        &self.applications
    }
}

impl HasDesk<Job> for AppState {
    fn desk(&self) -> &Desk<Job> {
        &self.jobs
    }
}

impl HasDesk<ExamResult> for AppState {
    fn desk(&self) -> &Desk<ExamResult> {
        &self.exams
    }
}

impl HasDesk<User> for AppState {
    fn desk(&self) -> &Desk<User> {
        &self.users
    }
}
