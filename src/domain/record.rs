use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single student entry as rendered in the records table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(alias = "idno")]
    pub id: String,
    #[serde(alias = "lastname")]
    pub last_name: String,
    #[serde(alias = "firstname")]
    pub first_name: String,
    pub course: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        course: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            course: course.into(),
            level: level.into(),
            image: None,
        }
    }

    /// Attaches a stored image filename.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Stored image reference exactly as saved, ignoring blank values.
    pub fn stored_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// The required form fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Id,
    LastName,
    FirstName,
    Course,
    Level,
}

impl RecordField {
    pub const ALL: [RecordField; 5] = [
        RecordField::Id,
        RecordField::LastName,
        RecordField::FirstName,
        RecordField::Course,
        RecordField::Level,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecordField::Id => "ID number",
            RecordField::LastName => "Last name",
            RecordField::FirstName => "First name",
            RecordField::Course => "Course",
            RecordField::Level => "Level",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::LastName => "lastname",
            RecordField::FirstName => "firstname",
            RecordField::Course => "course",
            RecordField::Level => "level",
        }
    }

    /// Free-text inputs, as opposed to the course and level choices.
    pub fn is_free_text(self) -> bool {
        matches!(
            self,
            RecordField::Id | RecordField::LastName | RecordField::FirstName
        )
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field `{}` (expected one of: id, lastname, firstname, course, level)",
            self.0
        )
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "id" | "idno" => Ok(RecordField::Id),
            "lastname" | "last" => Ok(RecordField::LastName),
            "firstname" | "first" => Ok(RecordField::FirstName),
            "course" => Ok(RecordField::Course),
            "level" => Ok(RecordField::Level),
            _ => Err(UnknownField(value.to_string())),
        }
    }
}
