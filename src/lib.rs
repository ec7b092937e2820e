mod domain;
mod infrastructure;
mod interfaces;

pub mod constants;
pub mod errors;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{http, map, notices, preview, routing};
pub use interfaces::{api, navigation, notify};

use errors::IntakeError;
use http::HttpOrphanageApi;
use notices::NoticeLog;
use routing::RouteHistory;
use settings::AppConfig;
use use_cases::intake::IntakeForm;

pub type AppIntakeForm = IntakeForm<HttpOrphanageApi, RouteHistory, NoticeLog>;

/// One wired view instance plus the host-facing handles it reports through.
pub struct IntakeApp {
    pub form: AppIntakeForm,
    pub history: RouteHistory,
    pub notices: NoticeLog,
}

impl IntakeApp {
    pub fn new(config: &AppConfig) -> Result<Self, IntakeError> {
        let api = HttpOrphanageApi::new(config)?;
        let history = RouteHistory::new();
        let notices = NoticeLog::new();

        let form = IntakeForm::new(api, history.clone(), notices.clone(), config.map_settings());

        Ok(IntakeApp {
            form,
            history,
            notices,
        })
    }
}
