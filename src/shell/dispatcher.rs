use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::filesystem::{NavigationError, VfsTree};
use crate::shell::{Console, TokenizeError, tokenize};

const NOT_LOADED: &str = "VFS not loaded";
const EMPTY_LISTING: &str = "(empty)";
const HOME_MARKER: &str = "~";

/// Who is driving the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Scripted,
}

impl Mode {
    /// Whether a failing command stops the remaining input.
    pub fn aborts_on_failure(self) -> bool {
        matches!(self, Mode::Scripted)
    }
}

/// What the driver should do after a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interprets command lines against an optional virtual filesystem.
#[derive(Debug, Default)]
pub struct Dispatcher {
    vfs: Option<VfsTree>,
}

impl Dispatcher {
    pub fn new(vfs: Option<VfsTree>) -> Self {
        Dispatcher { vfs }
    }

    /// Working directory for the prompt, `~` when no filesystem is loaded.
    pub fn prompt_path(&self) -> String {
        self.vfs
            .as_ref()
            .map(VfsTree::current_path)
            .unwrap_or_else(|| HOME_MARKER.to_string())
    }

    /// Tokenizes and runs one line. A failure is reported on the console as
    /// a single line before being returned.
    pub fn execute_line(
        &mut self,
        line: &str,
        mode: Mode,
        console: &mut impl Console,
    ) -> Result<Flow, CommandError> {
        let result = tokenize(line)
            .context(TokenizeSnafu)
            .and_then(|tokens| self.dispatch(&tokens, mode, console));

        if let Err(error) = &result {
            debug!("Command '{}' failed in {:?} mode: {}", line, mode, error);
            console.print_error(&error.to_string());
        }
        result
    }

    /// Runs an already tokenized command. Blank input is a successful no-op.
    pub fn dispatch(
        &mut self,
        tokens: &[String],
        mode: Mode,
        console: &mut impl Console,
    ) -> Result<Flow, CommandError> {
        let Some((verb, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!("Dispatching '{}' with {:?} in {:?} mode", verb, args, mode);

        match verb.as_str() {
            "ls" => {
                self.list(console);
                Ok(Flow::Continue)
            }
            "cd" => self.change_directory(args.first(), console),
            "exit" => match mode {
                Mode::Interactive => {
                    info!("Exit requested");
                    Ok(Flow::Exit)
                }
                Mode::Scripted => {
                    console.print("exit command in script - ignoring");
                    Ok(Flow::Continue)
                }
            },
            _ => UnknownCommandSnafu { verb }.fail(),
        }
    }

    fn list(&self, console: &mut impl Console) {
        let Some(vfs) = &self.vfs else {
            console.print(NOT_LOADED);
            return;
        };

        let entries = vfs.list_current();
        if entries.is_empty() {
            console.print(EMPTY_LISTING);
        }
        for entry in entries {
            console.print(&entry);
        }
    }

    fn change_directory(
        &mut self,
        target: Option<&String>,
        console: &mut impl Console,
    ) -> Result<Flow, CommandError> {
        let Some(vfs) = &mut self.vfs else {
            console.print(NOT_LOADED);
            return Ok(Flow::Continue);
        };
        let target = target.ok_or(CommandError::MissingArgumentError)?;

        vfs.change_directory(target).context(NavigationSnafu)?;
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Snafu)]
pub enum CommandError {
    #[snafu(display("Error: {}", source))]
    TokenizeError { source: TokenizeError },
    #[snafu(display("cd: missing argument"))]
    MissingArgumentError,
    #[snafu(display("cd: {}", source))]
    NavigationError { source: NavigationError },
    #[snafu(display("Command not found: {}", verb))]
    UnknownCommandError { verb: String },
}
