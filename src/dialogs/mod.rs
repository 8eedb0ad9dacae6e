//! Modal dialogs shown over the records table.
//!
//! Both dialogs close on an explicit cancel, the escape gesture, or a click
//! outside the dialog. Only confirming an open delete dialog produces work.

use crate::api::DeleteRequest;
use crate::form::ValidationError;

/// User gestures a dialog reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
    Escape,
    OutsideClick,
}

/// Delete-confirmation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteDialog {
    target: Option<String>,
}

impl DeleteDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `id`, replacing any previous target, and returns
    /// the prompt to display.
    pub fn open(&mut self, id: impl Into<String>) -> String {
        let id = id.into();
        let prompt = Self::prompt_for(&id);
        self.target = Some(id);
        prompt
    }

    pub fn prompt_for(id: &str) -> String {
        format!("Are you sure you want to delete student ID {}?", id)
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn prompt(&self) -> Option<String> {
        self.target.as_deref().map(Self::prompt_for)
    }

    /// Closes the dialog. Returns the delete to run when the action confirms
    /// an open dialog.
    pub fn handle(&mut self, action: DialogAction) -> Option<DeleteRequest> {
        let target = self.target.take()?;
        match action {
            DialogAction::Confirm => Some(DeleteRequest::new(target)),
            DialogAction::Cancel | DialogAction::Escape | DialogAction::OutsideClick => {
                tracing::debug!(id = %target, ?action, "delete dismissed");
                None
            }
        }
    }
}

/// Error display dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDialog {
    message: Option<String>,
}

impl ErrorDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn show_validation(&mut self, err: &ValidationError) {
        self.open(err.dialog_message());
    }

    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Any action dismisses the dialog.
    pub fn handle(&mut self, _action: DialogAction) {
        self.message = None;
    }
}

/// Both dialogs of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub delete: DeleteDialog,
    pub error: ErrorDialog,
}

impl Dialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The escape key closes every open dialog.
    pub fn escape(&mut self) {
        self.delete.handle(DialogAction::Escape);
        self.error.handle(DialogAction::Escape);
    }

    pub fn any_open(&self) -> bool {
        self.delete.is_open() || self.error.is_open()
    }
}
