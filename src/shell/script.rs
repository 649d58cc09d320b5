use std::path::Path;
use std::string::FromUtf8Error;

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::ext::{LineExt, PathDisplayExt};
use crate::shell::{Console, Dispatcher, Mode};

/// Commands of a startup script, comments and blank lines removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

/// How a script replay ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Completed { executed: usize },
    /// `executed` includes the failing line.
    Aborted { executed: usize, line: String },
}

impl Script {
    pub async fn from_path(path: &Path) -> Result<Self, ScriptError> {
        debug!("Reading script file: {}", path.path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            path: path.path_display(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            path: path.path_display(),
        })?;
        Ok(Self::from(contents.as_str()))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replays every line in scripted mode, echoing it first. Stops at the
    /// first failing command.
    pub fn run(&self, dispatcher: &mut Dispatcher, console: &mut impl Console) -> ScriptOutcome {
        info!("Running startup script with {} commands", self.lines.len());

        for (index, line) in self.lines.iter().enumerate() {
            console.print(&format!("$ {line}"));
            let result = dispatcher.execute_line(line, Mode::Scripted, console);

            if result.is_err() && Mode::Scripted.aborts_on_failure() {
                warn!("Startup script aborted at '{}'", line);
                console.print("Script execution stopped due to error.");
                return ScriptOutcome::Aborted {
                    executed: index + 1,
                    line: line.clone(),
                };
            }
        }

        ScriptOutcome::Completed {
            executed: self.lines.len(),
        }
    }
}

impl From<&str> for Script {
    fn from(contents: &str) -> Self {
        Script {
            lines: contents
                .lines()
                .filter(|line| !line.is_blank_or_comment())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ScriptError {
    #[snafu(display("{}: {}", path, source))]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("{} is not valid UTF-8", path))]
    EncodingError { path: String, source: FromUtf8Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::VfsTree;
    use crate::shell::{Flow, RecordingConsole};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dispatcher() -> Dispatcher {
        let vfs = VfsTree::try_from("file;/a/b.txt;aGVsbG8=\ndir;/a/c\n").unwrap();
        Dispatcher::new(Some(vfs))
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let script = Script::from("# setup\n\ncd a\n   # note\n  ls\n");
        assert_eq!(script.lines(), ["cd a", "  ls"]);
    }

    #[test]
    fn runs_every_line() {
        let mut dispatcher = dispatcher();
        let mut console = RecordingConsole::default();

        let outcome = Script::from("cd a\nls\nexit\ncd c\n").run(&mut dispatcher, &mut console);

        assert_eq!(outcome, ScriptOutcome::Completed { executed: 4 });
        assert_eq!(
            console.lines,
            [
                "$ cd a",
                "$ ls",
                "b.txt",
                "c/",
                "$ exit",
                "exit command in script - ignoring",
                "$ cd c",
            ]
        );
        assert_eq!(dispatcher.prompt_path(), "/a/c");
    }

    #[test]
    fn stops_at_first_failure_and_session_continues() {
        let mut dispatcher = dispatcher();
        let mut console = RecordingConsole::default();

        let outcome =
            Script::from("cd a\ncd nowhere\ncd c\nls\n").run(&mut dispatcher, &mut console);

        assert_eq!(
            outcome,
            ScriptOutcome::Aborted {
                executed: 2,
                line: "cd nowhere".to_string()
            }
        );
        assert_eq!(
            console.lines,
            [
                "$ cd a",
                "$ cd nowhere",
                "error: cd: no such directory: nowhere",
                "Script execution stopped due to error.",
            ]
        );
        assert_eq!(dispatcher.prompt_path(), "/a");

        let mut console = RecordingConsole::default();
        let flow = dispatcher
            .execute_line("ls", Mode::Interactive, &mut console)
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(console.lines, ["b.txt", "c/"]);
    }

    #[test]
    fn unknown_command_aborts() {
        let mut dispatcher = dispatcher();
        let mut console = RecordingConsole::default();

        let outcome = Script::from("pwd\nls\n").run(&mut dispatcher, &mut console);

        assert!(matches!(outcome, ScriptOutcome::Aborted { executed: 1, .. }));
        assert_eq!(console.errors(), ["Command not found: pwd"]);
    }

    #[test]
    fn empty_script_completes() {
        let mut dispatcher = Dispatcher::new(None);
        let mut console = RecordingConsole::default();

        let outcome = Script::from("# nothing here\n").run(&mut dispatcher, &mut console);

        assert_eq!(outcome, ScriptOutcome::Completed { executed: 0 });
        assert!(console.lines.is_empty());
    }

    #[compio::test]
    async fn reads_script_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "# startup\ncd /a\nls").expect("Failed to write to temp file");

        let script = Script::from_path(file.path()).await.unwrap();
        assert_eq!(script.lines(), ["cd /a", "ls"]);
    }

    #[compio::test]
    async fn missing_script_is_a_read_error() {
        let result = Script::from_path(Path::new("/no/such/script.txt")).await;
        assert!(matches!(result, Err(ScriptError::ReadError { .. })));
    }
}
