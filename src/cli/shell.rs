use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, FilenameCompleter, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, Validator,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::Operand;
use crate::config::Config;
use crate::domain::RecordField;

pub const SCRIPT_ENV: &str = "ROSTER_FORM_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<RosterHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(RosterHelper::new(context.registry.operands())));

    output::info("Type `help` to list commands. Tab completes fields and row ids.");

    loop {
        if let Some(helper) = editor.helper_mut() {
            helper.record_ids = context.table.ids().map(str::to_string).collect();
        }

        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if step(context, line)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if step(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line; a failing command is reported and the session goes on.
fn step(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

/// Splits a line into words and dispatches it. Blank lines and lines
/// starting with `#` are skipped.
pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not read `{}`: {}", line.trim(), err));
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

/// Completes command names, then the first argument according to the
/// command's [`Operand`]: field keys, row ids, config keys or file paths.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct RosterHelper {
    commands: Vec<(&'static str, Operand)>,
    record_ids: Vec<String>,
    files: FilenameCompleter,
}

impl RosterHelper {
    fn new(commands: Vec<(&'static str, Operand)>) -> Self {
        Self {
            commands,
            record_ids: Vec::new(),
            files: FilenameCompleter::new(),
        }
    }

    fn operand(&self, command: &str) -> Operand {
        self.commands
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(command))
            .map_or(Operand::None, |(_, operand)| *operand)
    }

    /// Word start and candidates for `prefix`, or `None` when the word is a
    /// path and file completion should take over.
    fn candidates(&self, prefix: &str) -> Option<(usize, Vec<String>)> {
        let start = prefix
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let pool: Vec<String> = match words.as_slice() {
            [] => self.commands.iter().map(|(name, _)| name.to_string()).collect(),
            [command] => match self.operand(command) {
                Operand::Path => return None,
                Operand::Command => self.commands.iter().map(|(name, _)| name.to_string()).collect(),
                Operand::Field => RecordField::ALL
                    .iter()
                    .map(|field| field.key().to_string())
                    .collect(),
                Operand::RecordId => self.record_ids.clone(),
                Operand::ConfigKey => vec!["set".to_string()],
                Operand::None => Vec::new(),
            },
            [command, set]
                if self.operand(command) == Operand::ConfigKey
                    && set.eq_ignore_ascii_case("set") =>
            {
                Config::KEYS.iter().map(|key| key.to_string()).collect()
            }
            _ => Vec::new(),
        };

        let needle = prefix[start..].to_ascii_lowercase();
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .collect();
        Some((start, matches))
    }
}

impl Completer for RosterHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some((start, matches)) = self.candidates(&line[..pos]) else {
            return self.files.complete(line, pos, ctx);
        };
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}
