use crate::api::{Operation, PayloadImage, RecordPayload, SubmissionRequest};
use crate::config::Config;
use crate::domain::{Record, RecordField};
use crate::form::state::{FormFields, FormMode, FormState};
use crate::form::validation::{self, ValidationError};
use crate::preview::{AvatarSource, LoadedPreview, PreviewTicket, SelectedImage};

/// Keeps one form's mode and content in sync with a selected record and
/// resolves submissions into create or update requests.
///
/// The controller never talks to the persistence API; the binding layer
/// executes whatever [`FormController::validate_and_submit`] returns.
#[derive(Debug, Clone)]
pub struct FormController {
    config: Config,
    state: FormState,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FormController {
    pub fn new(config: Config) -> Self {
        let state = FormState::new(config.placeholder_image.clone());
        Self { config, state }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn mode(&self) -> &FormMode {
        &self.state.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.state.fields
    }

    pub fn avatar(&self) -> &AvatarSource {
        &self.state.avatar
    }

    pub fn pending_image(&self) -> Option<&SelectedImage> {
        self.state.pending_image.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies new preferences. The placeholder takes effect on the next reset
    /// unless the placeholder is currently shown.
    pub fn set_config(&mut self, config: Config) {
        if self.state.avatar.is_placeholder() {
            self.state.avatar = AvatarSource::Placeholder(config.placeholder_image.clone());
        }
        self.config = config;
    }

    /// Caption of the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.state.mode.is_edit() {
            "UPDATE"
        } else {
            "SAVE"
        }
    }

    /// Mirrors `record` into the form and switches to edit mode.
    pub fn begin_edit(&mut self, record: &Record) {
        let stored_image = record.stored_image().map(str::to_string);
        self.state.avatar = match &stored_image {
            Some(name) => AvatarSource::Stored(self.config.stored_image_url(name)),
            None => self.placeholder(),
        };
        self.state.fields = FormFields::from_record(record, self.config.uppercase_input);
        self.state.mode = FormMode::Edit {
            editing_id: record.id.clone(),
            stored_image,
        };
        self.state.pending_image = None;
        self.state.generation += 1;
        tracing::debug!(id = %record.id, "form switched to edit mode");
    }

    /// Clears the form back to create mode.
    pub fn begin_create(&mut self) {
        self.state.fields.clear();
        self.state.mode = FormMode::Create;
        self.state.pending_image = None;
        self.state.avatar = self.placeholder();
        self.state.generation += 1;
        tracing::debug!("form reset to create mode");
    }

    /// Records an input event for `field`.
    pub fn set_field(&mut self, field: RecordField, value: &str) {
        let value = if self.config.uppercase_input && field.is_free_text() {
            value.to_uppercase()
        } else {
            value.to_string()
        };
        self.state.fields.set(field, value);
    }

    /// Replaces every field at once, applying the same input rules as
    /// [`FormController::set_field`].
    pub fn fill(&mut self, fields: &FormFields) {
        for field in RecordField::ALL {
            self.set_field(field, fields.get(field));
        }
    }

    /// Selects a new image. Returns the read the caller should perform, or
    /// `None` when no file was chosen.
    pub fn select_image(&mut self, file: Option<SelectedImage>) -> Option<PreviewTicket> {
        let image = file?;
        self.state.generation += 1;
        self.state.pending_image = Some(image.clone());
        tracing::debug!(file = %image.file_name, generation = self.state.generation, "image selected");
        Some(PreviewTicket {
            generation: self.state.generation,
            image,
        })
    }

    /// Shows a finished read unless a later selection or reset superseded it.
    pub fn apply_preview(&mut self, loaded: LoadedPreview) -> bool {
        if loaded.generation != self.state.generation {
            tracing::debug!(
                stale = loaded.generation,
                current = self.state.generation,
                "discarding stale preview"
            );
            return false;
        }
        self.state.avatar = AvatarSource::Preview(loaded.data_url);
        true
    }

    /// Drops a selection whose read failed so it is never uploaded. A later
    /// selection or reset is left alone.
    pub fn discard_selection(&mut self, generation: u64) -> bool {
        if generation != self.state.generation {
            return false;
        }
        self.state.pending_image = None;
        tracing::debug!(generation, "unreadable image dropped");
        true
    }

    /// Validates the current fields against `existing_ids` and resolves the
    /// request to dispatch. Form state is left untouched either way.
    ///
    /// In edit mode the id being edited may appear in `existing_ids`; it is
    /// never counted as a collision.
    pub fn validate_and_submit<'a, I>(
        &self,
        existing_ids: I,
    ) -> Result<SubmissionRequest, ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields = validation::require_all(&self.state.fields)?;
        validation::ensure_unique(&fields.id, existing_ids, self.state.mode.editing_id())?;

        let (operation, image) = match &self.state.mode {
            FormMode::Create => (Operation::Create, self.uploaded_image_or(PayloadImage::None)),
            FormMode::Edit {
                editing_id,
                stored_image,
            } => {
                let kept = stored_image
                    .clone()
                    .map(PayloadImage::Stored)
                    .unwrap_or(PayloadImage::None);
                (
                    Operation::Update {
                        id: editing_id.clone(),
                    },
                    self.uploaded_image_or(kept),
                )
            }
        };

        let FormFields {
            id,
            last_name,
            first_name,
            course,
            level,
        } = fields;
        Ok(SubmissionRequest {
            operation,
            payload: RecordPayload {
                id,
                last_name,
                first_name,
                course,
                level,
                image,
            },
        })
    }

    fn uploaded_image_or(&self, fallback: PayloadImage) -> PayloadImage {
        self.state
            .pending_image
            .clone()
            .map(PayloadImage::Upload)
            .unwrap_or(fallback)
    }

    fn placeholder(&self) -> AvatarSource {
        AvatarSource::Placeholder(self.config.placeholder_image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_uppercased_only_for_free_text() {
        let mut form = FormController::default();
        form.set_field(RecordField::LastName, "dela cruz");
        form.set_field(RecordField::Course, "bscs");
        assert_eq!(form.fields().last_name, "DELA CRUZ");
        assert_eq!(form.fields().course, "bscs");
    }

    #[test]
    fn uppercasing_can_be_disabled() {
        let config = Config {
            uppercase_input: false,
            ..Config::default()
        };
        let mut form = FormController::new(config);
        form.set_field(RecordField::FirstName, "jane");
        assert_eq!(form.fields().first_name, "jane");
    }

    #[test]
    fn submit_label_tracks_mode() {
        let mut form = FormController::default();
        assert_eq!(form.submit_label(), "SAVE");
        form.begin_edit(&Record::new("101", "doe", "jane", "BSCS", "1"));
        assert_eq!(form.submit_label(), "UPDATE");
        assert_eq!(form.fields().last_name, "DOE");
        assert_eq!(form.fields().course, "bscs");
    }

    #[test]
    fn reset_invalidates_in_flight_preview() {
        let mut form = FormController::default();
        let ticket = form
            .select_image(Some(SelectedImage::from_path("/tmp/a.png")))
            .unwrap();
        form.begin_create();
        let applied = form.apply_preview(LoadedPreview {
            generation: ticket.generation,
            data_url: "data:image/png;base64,AA==".into(),
        });
        assert!(!applied);
        assert!(form.avatar().is_placeholder());
    }

    #[test]
    fn placeholder_follows_config_while_shown() {
        let mut form = FormController::default();
        form.set_config(Config {
            placeholder_image: "/img/blank.png".into(),
            ..Config::default()
        });
        assert_eq!(form.avatar().src(), "/img/blank.png");
    }
}
