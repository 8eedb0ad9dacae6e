use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::preview::SelectedImage;

/// Which write the persistence API should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Create,
    /// Update keyed by the id the record had when editing began.
    Update { id: String },
}

/// Image part of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum PayloadImage {
    None,
    /// Keep the image already stored for the record.
    Stored(String),
    /// Upload a newly selected file.
    Upload(SelectedImage),
}

impl PayloadImage {
    /// Filename the record ends up referencing.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            PayloadImage::None => None,
            PayloadImage::Stored(name) => Some(name),
            PayloadImage::Upload(image) => Some(&image.file_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub course: String,
    pub level: String,
    pub image: PayloadImage,
}

impl RecordPayload {
    pub fn to_record(&self) -> Record {
        Record {
            id: self.id.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            course: self.course.clone(),
            level: self.level.clone(),
            image: self.image.file_name().map(str::to_string),
        }
    }
}

/// A resolved create or update, ready for the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub operation: Operation,
    pub payload: RecordPayload,
}

impl SubmissionRequest {
    pub fn method(&self) -> &'static str {
        "POST"
    }

    pub fn route(&self) -> String {
        match &self.operation {
            Operation::Create => "/add".to_string(),
            Operation::Update { id } => format!("/update/{}", id),
        }
    }
}

/// A confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

impl DeleteRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn method(&self) -> &'static str {
        "GET"
    }

    pub fn route(&self) -> String {
        format!("/delete/{}", self.id)
    }
}
