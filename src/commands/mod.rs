//! Built-in REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and dynamic help generation. Any input that is not a command is an
//! expression for the calculator.

mod clear;
mod help;
mod quit;
mod status;

use async_trait::async_trait;
use std::sync::Arc;

use crate::display::DisplayState;
use crate::engine::Calculator;

/// Session info available to commands during execution.
pub struct SessionInfo<'a> {
    pub model: &'a str,
    pub key_url: &'a str,
    pub credential_loaded: bool,
    pub typesetter: Option<&'a str>,
    pub display: &'a DisplayState,
}

impl<'a> SessionInfo<'a> {
    pub fn from_calculator(calc: &'a Calculator) -> Self {
        Self {
            model: calc.model(),
            key_url: calc.key_url(),
            credential_loaded: calc.session().has_credential(),
            typesetter: calc.typesetter_name(),
            display: calc.display(),
        }
    }
}

/// What the REPL should do after a command runs.
#[derive(Debug)]
pub enum CommandResult {
    /// Not a command; pass input to the calculator.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Reset the calculator's input and result regions.
    Clear,
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/clear"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command.
    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(clear::ClearCommand),
            Arc::new(status::StatusCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Register an additional command.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let cmd = input.trim();

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(info).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out.push_str("\n  anything else is evaluated as an operation, e.g. `2 + 2 * 3`\n");
        out
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}
