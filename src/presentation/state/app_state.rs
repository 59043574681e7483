use std::sync::Arc;

use crate::application::ports::{ContractRepository, ModelClient};
use crate::application::services::{AcquisitionService, AnalysisService};
use crate::presentation::config::Settings;

pub struct AppState<M: ModelClient> {
    pub acquisition_service: Arc<AcquisitionService<M>>,
    pub analysis_service: Arc<AnalysisService<M>>,
    pub contract_repository: Arc<dyn ContractRepository>,
    pub settings: Settings,
}

impl<M: ModelClient> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            acquisition_service: Arc::clone(&self.acquisition_service),
            analysis_service: Arc::clone(&self.analysis_service),
            contract_repository: Arc::clone(&self.contract_repository),
            settings: self.settings.clone(),
        }
    }
}
