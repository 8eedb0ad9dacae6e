//! Core CLI loop state, dispatch, and error reporting.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

use crate::{
    api::{ApiError, PersistenceApi},
    config::{ConfigError, ConfigManager},
    dialogs::{DialogAction, Dialogs},
    domain::RecordTable,
    errors::RosterError,
    form::{FormController, FormMode},
    preview::PreviewError,
};

use super::commands;
use super::output;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] RosterError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(RosterError::from(err))
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] RosterError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(err.into())
    }
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        CommandError::Core(err.into())
    }
}

impl From<PreviewError> for CommandError {
    fn from(err: PreviewError) -> Self {
        CommandError::Core(err.into())
    }
}

/// State shared by every command: the form, the rendered rows, and the
/// dialogs layered over them.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) config_manager: ConfigManager,
    pub(crate) form: FormController,
    pub(crate) table: RecordTable,
    pub(crate) dialogs: Dialogs,
    pub(crate) runtime: Runtime,
    pub(crate) theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(ShellContext {
            mode,
            registry,
            config_manager,
            form: FormController::new(config),
            table: RecordTable::default(),
            dialogs: Dialogs::new(),
            runtime,
            theme: ColorfulTheme::default(),
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn dialogs(&self) -> &Dialogs {
        &self.dialogs
    }

    pub(crate) fn prompt(&self) -> String {
        match self.form.mode() {
            FormMode::Create => "roster [new]> ".to_string(),
            FormMode::Edit { editing_id, .. } => format!("roster [edit {}]> ", editing_id),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(false)
            .interact()?)
    }

    /// Asks for the open delete dialog's answer. Script mode leaves the
    /// dialog open for a later `confirm` or `cancel` command.
    pub(crate) fn ask_delete(&mut self) -> CommandResult {
        let Some(prompt) = self.dialogs.delete.prompt() else {
            return Ok(());
        };
        if self.mode == CliMode::Script {
            output::info(prompt);
            output::hint("Use `confirm` to delete or `cancel` to keep the record.");
            return Ok(());
        }
        let action = match Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact_opt()?
        {
            Some(true) => DialogAction::Confirm,
            Some(false) => DialogAction::Cancel,
            None => DialogAction::Escape,
        };
        self.resolve_delete(action)
    }

    pub(crate) fn resolve_delete(&mut self, action: DialogAction) -> CommandResult {
        let Some(request) = self.dialogs.delete.handle(action) else {
            output::info("Delete cancelled.");
            return Ok(());
        };
        tracing::info!(route = %request.route(), "dispatching delete");
        self.table.delete(&request)?;
        self.form.begin_create();
        output::success(format!("Student {} deleted.", request.id));
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}
