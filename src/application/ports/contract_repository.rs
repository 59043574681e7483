use async_trait::async_trait;

use crate::domain::{ContractId, ContractRecord};

/// Key-value style store for completed analyses. The shipped implementation
/// is an in-memory stub; a durable backend would slot in behind this port.
#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn create(&self, record: &ContractRecord) -> Result<(), RepositoryError>;
    async fn get(&self, id: ContractId) -> Result<Option<ContractRecord>, RepositoryError>;
    async fn update(&self, record: &ContractRecord) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage failure: {0}")]
    StorageFailure(String),
}
