//! Create/edit form reconciliation for student records.
//!
//! [`FormController`] owns a [`FormState`] and is mutated only through its
//! operations: `begin_edit`, `begin_create`, `set_field`, `select_image`,
//! `apply_preview`, and `validate_and_submit`.

pub mod controller;
pub mod state;
pub mod validation;

pub use controller::FormController;
pub use state::{FormFields, FormMode, FormState};
pub use validation::ValidationError;
