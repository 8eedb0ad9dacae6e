//! Seam to the persistence API that executes resolved requests.
//!
//! The API itself lives outside this crate. [`RecordTable`] implements
//! [`PersistenceApi`] so a binding layer can refresh its rendered rows after
//! a request goes through.

pub mod request;

use thiserror::Error;

use crate::domain::RecordTable;

pub use request::{DeleteRequest, Operation, PayloadImage, RecordPayload, SubmissionRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("no record with id `{0}`")]
    NotFound(String),
    #[error("a record with id `{0}` already exists")]
    Conflict(String),
}

/// Executes create, update, and delete requests.
pub trait PersistenceApi {
    fn submit(&mut self, request: &SubmissionRequest) -> Result<(), ApiError>;

    fn delete(&mut self, request: &DeleteRequest) -> Result<(), ApiError>;
}

impl PersistenceApi for RecordTable {
    fn submit(&mut self, request: &SubmissionRequest) -> Result<(), ApiError> {
        let record = request.payload.to_record();
        match &request.operation {
            Operation::Create => {
                if self.find(&record.id).is_some() {
                    return Err(ApiError::Conflict(record.id));
                }
                self.push(record);
            }
            Operation::Update { id } => {
                let index = self
                    .position(id)
                    .ok_or_else(|| ApiError::NotFound(id.clone()))?;
                if record.id != *id && self.find(&record.id).is_some() {
                    return Err(ApiError::Conflict(record.id));
                }
                self.replace_at(index, record);
            }
        }
        Ok(())
    }

    fn delete(&mut self, request: &DeleteRequest) -> Result<(), ApiError> {
        let index = self
            .position(&request.id)
            .ok_or_else(|| ApiError::NotFound(request.id.clone()))?;
        self.remove_at(index);
        Ok(())
    }
}
