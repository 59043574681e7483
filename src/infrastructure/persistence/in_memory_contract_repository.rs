use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::{ContractRepository, RepositoryError};
use crate::domain::{ContractId, ContractRecord};

/// Process-lifetime contract store standing in for a durable backend.
#[derive(Default)]
pub struct InMemoryContractRepository {
    records: RwLock<HashMap<ContractId, ContractRecord>>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn create(&self, record: &ContractRecord) -> Result<(), RepositoryError> {
        self.records
            .write()
            .map_err(|e| RepositoryError::StorageFailure(e.to_string()))?
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: ContractId) -> Result<Option<ContractRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .map_err(|e| RepositoryError::StorageFailure(e.to_string()))?
            .get(&id)
            .cloned())
    }

    async fn update(&self, record: &ContractRecord) -> Result<(), RepositoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| RepositoryError::StorageFailure(e.to_string()))?;

        if !records.contains_key(&record.id) {
            return Err(RepositoryError::NotFound(record.id.as_uuid().to_string()));
        }

        records.insert(record.id, record.clone());
        Ok(())
    }
}
