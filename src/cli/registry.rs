use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// What a command's first argument refers to, so the line editor can offer
/// matching candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Command,
    Field,
    RecordId,
    Path,
    ConfigKey,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub operand: Operand,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            operand: Operand::None,
            handler,
        }
    }

    pub fn taking(mut self, operand: Operand) -> Self {
        self.operand = operand;
        self
    }
}

/// Commands in the order `help` lists them. Names are unique; registering a
/// name twice replaces the earlier entry in place.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Command names paired with their operand kind, for completion.
    pub fn operands(&self) -> Vec<(&'static str, Operand)> {
        self.entries
            .iter()
            .map(|entry| (entry.name, entry.operand))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn re_registering_keeps_position() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "a", "list", noop));
        registry.register(CommandEntry::new("edit", "b", "edit <id>", noop).taking(Operand::RecordId));
        registry.register(CommandEntry::new("list", "c", "list", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "edit"]);
        assert_eq!(registry.get("list").map(|entry| entry.description), Some("c"));
        assert_eq!(registry.operands()[1], ("edit", Operand::RecordId));
    }
}
