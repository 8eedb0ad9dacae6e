//! Shell commands. Each one maps onto a page interaction: clicking a row's
//! edit or delete button, typing into a field, choosing an avatar, pressing
//! the submit or reset button, or answering a dialog.

use std::path::{Path, PathBuf};

use crate::api::{Operation, PersistenceApi};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry, Operand};
use crate::dialogs::DialogAction;
use crate::domain::{RecordField, RecordTable};
use crate::errors::RosterError;
use crate::form::FormMode;
use crate::preview::{load_preview, SelectedImage};

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let entries = [
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help)
            .taking(Operand::Command),
        CommandEntry::new("load", "Load rendered rows from a JSON file", "load <path>", cmd_load)
            .taking(Operand::Path),
        CommandEntry::new("list", "Show the records table", "list", cmd_list),
        CommandEntry::new("new", "Reset the form to add a new student", "new", cmd_new),
        CommandEntry::new("edit", "Mirror a row into the form for editing", "edit <id>", cmd_edit)
            .taking(Operand::RecordId),
        CommandEntry::new(
            "set",
            "Type a value into a form field",
            "set <id|lastname|firstname|course|level> <value...>",
            cmd_set,
        )
        .taking(Operand::Field),
        CommandEntry::new("image", "Choose an avatar image to preview", "image [path]", cmd_image)
            .taking(Operand::Path),
        CommandEntry::new("form", "Show the form state", "form", cmd_form),
        CommandEntry::new("save", "Validate and submit the form", "save", cmd_save),
        CommandEntry::new("delete", "Ask to delete a student", "delete <id>", cmd_delete)
            .taking(Operand::RecordId),
        CommandEntry::new("confirm", "Confirm the open delete dialog", "confirm", cmd_confirm),
        CommandEntry::new("cancel", "Dismiss the open dialog", "cancel", cmd_cancel),
        CommandEntry::new("escape", "Close every open dialog", "escape", cmd_escape),
        CommandEntry::new(
            "config",
            "Show or change preferences",
            "config [set <key> <value>]",
            cmd_config,
        )
        .taking(Operand::ConfigKey),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ];
    for entry in entries {
        registry.register(entry);
    }
}

fn usage_error(context: &ShellContext, command: &str) -> CommandError {
    let usage = context
        .registry
        .get(command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let Some(entry) = context.registry.get(&name.to_lowercase()) else {
            context.suggest_command(name);
            return Ok(());
        };
        output::section(format!("Help: {}", entry.name));
        output::info(format!("  Description: {}", entry.description));
        output::info(format!("  Usage: {}", entry.usage));
        return Ok(());
    }

    output::section("Available commands");
    for entry in context.registry.list() {
        output::info(format!("  {:<8} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage_error(context, "load"));
    };
    let table = RecordTable::load(Path::new(path))?;
    let count = table.len();
    context.table = table;
    context.dialogs.escape();
    context.form.begin_create();
    output::success(format!("Loaded {} records from {}.", count, path));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.table.is_empty() {
        output::info("No records. Use `load <path>` or `save` a new student.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = context
        .table
        .rows()
        .iter()
        .map(|row| {
            vec![
                row.id.clone(),
                row.last_name.clone(),
                row.first_name.clone(),
                row.course.clone(),
                row.level.clone(),
                row.stored_image().unwrap_or("-").to_string(),
            ]
        })
        .collect();
    output::render_table(
        &["ID", "Last name", "First name", "Course", "Level", "Image"],
        &rows,
    );
    Ok(())
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.form.begin_create();
    output::success("Form reset.");
    print_form(context);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage_error(context, "edit"));
    };
    let record = context
        .table
        .find(id)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments(format!("No student with ID {}.", id)))?;
    context.form.begin_edit(&record);
    output::success(format!(
        "Editing student {} ({}).",
        record.id,
        record.display_name()
    ));
    print_form(context);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((name, value)) = args.split_first() else {
        return Err(usage_error(context, "set"));
    };
    let field: RecordField = name
        .parse()
        .map_err(|err: crate::domain::UnknownField| CommandError::InvalidArguments(err.to_string()))?;
    context.form.set_field(field, &value.join(" "));
    output::info(format!(
        "{}: {}",
        field.label(),
        context.form.fields().get(field)
    ));
    Ok(())
}

fn cmd_image(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let file = match args {
        [] => None,
        [path] => {
            let path = PathBuf::from(*path);
            if !path.is_file() {
                return Err(CommandError::InvalidArguments(format!(
                    "Image file not found: {}",
                    path.display()
                )));
            }
            Some(SelectedImage::from_path(path))
        }
        _ => return Err(usage_error(context, "image")),
    };

    let Some(ticket) = context.form.select_image(file) else {
        output::info("No file selected.");
        return Ok(());
    };
    let file_name = ticket.image.file_name.clone();
    let generation = ticket.generation;
    let loaded = match context.runtime.block_on(load_preview(ticket)) {
        Ok(loaded) => loaded,
        Err(err) => {
            context.form.discard_selection(generation);
            return Err(err.into());
        }
    };
    if context.form.apply_preview(loaded) {
        output::success(format!("Previewing {}.", file_name));
    }
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_form(context);
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = match context.form.validate_and_submit(context.table.ids()) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "submission rejected");
            context.dialogs.error.show_validation(&err);
            if let Some(message) = context.dialogs.error.message() {
                output::error(message);
            }
            return Ok(());
        }
    };

    tracing::info!(method = request.method(), route = %request.route(), "dispatching submission");
    output::info(format!("{} {}", request.method(), request.route()));
    output::info(serde_json::to_string_pretty(&request.payload).map_err(RosterError::from)?);

    context.table.submit(&request)?;
    context.dialogs.error.handle(DialogAction::Cancel);
    context.form.begin_create();
    match request.operation {
        Operation::Create => output::success("Student added."),
        Operation::Update { .. } => output::success("Student updated."),
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage_error(context, "delete"));
    };
    if context.table.find(id).is_none() {
        return Err(CommandError::InvalidArguments(format!(
            "No student with ID {}.",
            id
        )));
    }
    context.dialogs.delete.open(*id);
    context.ask_delete()
}

fn cmd_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.dialogs.delete.is_open() {
        output::warning("No delete dialog is open.");
        return Ok(());
    }
    context.resolve_delete(DialogAction::Confirm)
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.dialogs.any_open() {
        output::warning("No dialog is open.");
        return Ok(());
    }
    if context.dialogs.delete.is_open() {
        context.resolve_delete(DialogAction::Cancel)?;
    }
    context.dialogs.error.handle(DialogAction::Cancel);
    Ok(())
}

fn cmd_escape(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.dialogs.any_open() {
        context.dialogs.escape();
        output::info("Dialogs closed.");
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = context.form.config();
            output::section("Configuration");
            output::info(format!("  placeholder_image: {}", config.placeholder_image));
            output::info(format!("  image_base_url: {}", config.image_base_url));
            output::info(format!("  uppercase_input: {}", config.uppercase_input));
            output::info(format!(
                "  file: {}",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        ["set", key, value] => {
            let mut config = context.form.config().clone();
            config.set_value(key, value)?;
            context.config_manager.save(&config)?;
            context.form.set_config(config);
            output::success("Configuration updated.");
            Ok(())
        }
        _ => Err(usage_error(context, "config")),
    }
}

fn print_form(context: &ShellContext) {
    let form = &context.form;
    output::section("Student form");
    match form.mode() {
        FormMode::Create => output::info("  Mode: add"),
        FormMode::Edit { editing_id, .. } => output::info(format!("  Mode: edit {}", editing_id)),
    }
    for field in RecordField::ALL {
        output::info(format!("  {:<11} {}", field.label(), form.fields().get(field)));
    }
    output::info(format!("  Avatar      {}", form.avatar()));
    if let Some(image) = form.pending_image() {
        output::info(format!("  New image   {}", image.file_name));
    }
    output::info(format!("  [{}]", form.submit_label()));
    if let Some(message) = context.dialogs.error.message() {
        output::warning(format!("Error dialog open: {}", message));
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::{CliMode, LoopControl, ShellContext};
    use crate::cli::shell::handle_line;
    use crate::config::ConfigManager;
    use crate::domain::Record;
    use crate::form::FormMode;

    fn context() -> (tempfile::TempDir, ShellContext) {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        context.table = vec![
            Record::new("101", "DOE", "JANE", "bscs", "1").with_image("101_a.png"),
            Record::new("102", "ROE", "RICHARD", "bsit", "2"),
        ]
        .into();
        (dir, context)
    }

    fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            assert_eq!(handle_line(context, line).unwrap(), LoopControl::Continue);
        }
    }

    #[test]
    fn edit_then_save_updates_row_and_resets_form() {
        let (_dir, mut context) = context();
        run(&mut context, &["edit 101", "set firstname janet", "save"]);

        let row = context.table.find("101").unwrap();
        assert_eq!(row.first_name, "JANET");
        assert_eq!(row.image.as_deref(), Some("101_a.png"));
        assert_eq!(context.form.mode(), &FormMode::Create);
    }

    #[test]
    fn duplicate_save_opens_error_dialog_and_keeps_form() {
        let (_dir, mut context) = context();
        run(
            &mut context,
            &[
                "set id 102",
                "set lastname x",
                "set firstname y",
                "set course bscs",
                "set level 1",
                "save",
            ],
        );
        assert_eq!(
            context.dialogs.error.message(),
            Some("Student ID 102 already exists. Please use a unique ID number.")
        );
        assert_eq!(context.form.fields().id, "102");
        assert_eq!(context.table.len(), 2);

        run(&mut context, &["escape"]);
        assert!(!context.dialogs.any_open());
    }

    #[test]
    fn script_delete_waits_for_confirmation() {
        let (_dir, mut context) = context();
        run(&mut context, &["delete 102", "cancel"]);
        assert_eq!(context.table.len(), 2);

        run(&mut context, &["delete 102", "confirm"]);
        assert!(context.table.find("102").is_none());
    }

    #[test]
    fn exit_stops_the_loop() {
        let (_dir, mut context) = context();
        assert_eq!(handle_line(&mut context, "exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn config_set_persists() {
        let (_dir, mut context) = context();
        run(&mut context, &["config set uppercase_input off"]);
        let saved = context.config_manager.load().unwrap();
        assert!(!saved.uppercase_input);
        assert!(!context.form.config().uppercase_input);
    }
}
