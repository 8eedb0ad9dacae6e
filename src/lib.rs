#![doc(test(attr(deny(warnings))))]

//! Roster Form offers the client-side behavior of a student-records page:
//! a create/edit form controller with duplicate-id validation, avatar preview,
//! and the delete-confirmation and error dialogs, plus a terminal shell that
//! drives them.

pub mod api;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod domain;
pub mod errors;
pub mod form;
pub mod preview;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Roster Form tracing initialized.");
    });
}
