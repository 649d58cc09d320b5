use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::shell::{Console, Dispatcher, Flow, Mode, StdoutConsole};

/// Interactive loop reading commands from the terminal.
pub struct Repl {
    editor: DefaultEditor,
    user: String,
    host: String,
}

impl Repl {
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Result<Self, ReplError> {
        let editor = DefaultEditor::new().context(EditorSnafu)?;
        Ok(Repl {
            editor,
            user: user.into(),
            host: host.into(),
        })
    }

    /// Reads and dispatches lines until `exit` or end of input.
    pub fn run(
        &mut self,
        dispatcher: &mut Dispatcher,
        console: &mut StdoutConsole,
    ) -> Result<(), ReplError> {
        loop {
            let prompt = render_prompt(
                &self.user,
                &self.host,
                &dispatcher.prompt_path(),
                console.supports_color(),
            );

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    // Failures are already on the console; the session goes on.
                    if let Ok(Flow::Exit) = dispatcher.execute_line(line, Mode::Interactive, console)
                    {
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    console.print("^C");
                }
                Err(ReadlineError::Eof) => {
                    debug!("End of input, leaving interactive session");
                    return Ok(());
                }
                Err(source) => return Err(ReplError::ReadError { source }),
            }
        }
    }
}

/// `user@host:path$ `
fn render_prompt(user: &str, host: &str, path: &str, color: bool) -> String {
    let identity = format!("{user}@{host}");
    if color {
        format!("{}:{}$ ", identity.green().bold(), path.blue().bold())
    } else {
        format!("{identity}:{path}$ ")
    }
}

#[derive(Debug, Snafu)]
pub enum ReplError {
    #[snafu(display("Failed to initialize the line editor"))]
    EditorError { source: ReadlineError },
    #[snafu(display("Failed to read from the terminal"))]
    ReadError { source: ReadlineError },
}
