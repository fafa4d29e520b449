//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use fieldcall_config::Settings;
use fieldcall_core::{FieldRepDirectory, ProspectDirectory};
use fieldcall_dialer::{CallRecordCorrelator, CallRecordStore, OutcomeRecorder};
use fieldcall_engine::CallingListGenerator;

/// Everything a request handler needs, injected explicitly
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub prospects: Arc<dyn ProspectDirectory>,
    pub field_reps: Arc<dyn FieldRepDirectory>,
    pub generator: Arc<CallingListGenerator>,
    pub correlator: Arc<CallRecordCorrelator>,
    pub outcomes: Arc<OutcomeRecorder>,
    pub call_records: Arc<dyn CallRecordStore>,
}

impl AppState {
    /// Wire the engine components from settings and the given backends
    pub fn new(
        settings: Settings,
        prospects: Arc<dyn ProspectDirectory>,
        field_reps: Arc<dyn FieldRepDirectory>,
        call_records: Arc<dyn CallRecordStore>,
    ) -> Self {
        let storage_timeout = Duration::from_millis(settings.storage.upsert_timeout_ms);

        let generator = Arc::new(CallingListGenerator::new(
            settings.scoring.clone(),
            settings.routing.clone(),
        ));
        let correlator = Arc::new(CallRecordCorrelator::new(
            call_records.clone(),
            storage_timeout,
        ));
        let outcomes = Arc::new(OutcomeRecorder::new(
            call_records.clone(),
            prospects.clone(),
        ));

        Self {
            settings: Arc::new(settings),
            prospects,
            field_reps,
            generator,
            correlator,
            outcomes,
            call_records,
        }
    }
}
