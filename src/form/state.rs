use serde::{Deserialize, Serialize};

use crate::domain::{Record, RecordField};
use crate::preview::{AvatarSource, SelectedImage};

/// Whether the form creates a new record or edits an existing one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit {
        editing_id: String,
        stored_image: Option<String>,
    },
}

impl FormMode {
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            FormMode::Create => None,
            FormMode::Edit { editing_id, .. } => Some(editing_id),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

/// Raw field values as currently entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub course: String,
    pub level: String,
}

impl FormFields {
    /// Mirrors a row into the form the way the page's edit button does.
    /// Names follow the upper-casing preference; the id is kept verbatim so
    /// it still matches the row it came from.
    pub fn from_record(record: &Record, uppercase_names: bool) -> Self {
        let name = |value: &str| {
            if uppercase_names {
                value.to_uppercase()
            } else {
                value.to_string()
            }
        };
        Self {
            id: record.id.clone(),
            last_name: name(&record.last_name),
            first_name: name(&record.first_name),
            course: record.course.to_lowercase(),
            level: record.level.clone(),
        }
    }

    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Id => &self.id,
            RecordField::LastName => &self.last_name,
            RecordField::FirstName => &self.first_name,
            RecordField::Course => &self.course,
            RecordField::Level => &self.level,
        }
    }

    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let slot = match field {
            RecordField::Id => &mut self.id,
            RecordField::LastName => &mut self.last_name,
            RecordField::FirstName => &mut self.first_name,
            RecordField::Course => &mut self.course,
            RecordField::Level => &mut self.level,
        };
        *slot = value.into();
    }

    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            course: self.course.trim().to_string(),
            level: self.level.trim().to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Transient state of one form instance, owned by `FormController`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub(crate) mode: FormMode,
    pub(crate) fields: FormFields,
    pub(crate) pending_image: Option<SelectedImage>,
    pub(crate) avatar: AvatarSource,
    pub(crate) generation: u64,
}

impl FormState {
    pub(crate) fn new(placeholder: String) -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::default(),
            pending_image: None,
            avatar: AvatarSource::Placeholder(placeholder),
            generation: 0,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn pending_image(&self) -> Option<&SelectedImage> {
        self.pending_image.as_ref()
    }

    pub fn avatar(&self) -> &AvatarSource {
        &self.avatar
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
