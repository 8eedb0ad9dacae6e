use thiserror::Error;

use crate::domain::RecordField;
use crate::form::FormFields;

/// Reasons a submission is rejected before it reaches the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(RecordField),
    #[error("Student ID {0} already exists")]
    DuplicateId(String),
}

impl ValidationError {
    /// Text shown in the error dialog.
    pub fn dialog_message(&self) -> String {
        match self {
            ValidationError::MissingField(_) => {
                "All fields are required. Please complete the form.".to_string()
            }
            ValidationError::DuplicateId(id) => format!(
                "Student ID {} already exists. Please use a unique ID number.",
                id
            ),
        }
    }
}

/// Returns the fields trimmed, or the first required field left blank.
pub fn require_all(fields: &FormFields) -> Result<FormFields, ValidationError> {
    let trimmed = fields.trimmed();
    match RecordField::ALL
        .into_iter()
        .find(|field| trimmed.get(*field).is_empty())
    {
        Some(missing) => Err(ValidationError::MissingField(missing)),
        None => Ok(trimmed),
    }
}

/// Rejects `id` when it matches any existing id other than `own_id`.
///
/// `own_id` is the id of the record being edited; matching it is not a
/// collision because the id is unchanged.
pub fn ensure_unique<'a, I>(id: &str, existing: I, own_id: Option<&str>) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let collides = existing
        .into_iter()
        .filter(|candidate| Some(*candidate) != own_id)
        .any(|candidate| candidate == id);
    if collides {
        Err(ValidationError::DuplicateId(id.to_string()))
    } else {
        Ok(())
    }
}
