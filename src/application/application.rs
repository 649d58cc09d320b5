use std::path::Path;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::{ConfigError, ShellConfig};
use crate::ext::PathDisplayExt;
use crate::filesystem::VfsTree;
use crate::shell::{Console, Dispatcher, Repl, ReplError, Script, StdoutConsole};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let config = ShellConfig::read(cli.config.as_deref())
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        let runtime = RuntimeConfig::new(cli, config);
        info!(
            "Session for {}@{}, manifest: {}, script: {}",
            runtime.user,
            runtime.host,
            describe(runtime.vfs.as_deref()),
            describe(runtime.script.as_deref()),
        );

        let mut console = StdoutConsole::detect();
        let mut dispatcher = Dispatcher::new(match &runtime.vfs {
            Some(path) => Self::load_vfs(path, &mut console).await,
            None => None,
        });

        if let Some(path) = &runtime.script {
            Self::run_startup_script(path, &mut dispatcher, &mut console).await;
        }

        Repl::new(runtime.user.as_str(), runtime.host.as_str())
            .context(ReplSnafu)?
            .run(&mut dispatcher, &mut console)
            .context(ReplSnafu)?;

        Ok(())
    }

    /// A failed load is reported and the session continues without a VFS.
    async fn load_vfs(path: &Path, console: &mut impl Console) -> Option<VfsTree> {
        match VfsTree::from_path(path).await {
            Ok(tree) => {
                info!("Loaded {} nodes", tree.node_count());
                console.print(&format!("VFS loaded successfully from: {}", path.display()));
                Some(tree)
            }
            Err(e) => {
                warn!("Failed to load manifest {}: {}", path.path_display(), e);
                console.print_error(&format!("Error loading VFS: {e}"));
                None
            }
        }
    }

    async fn run_startup_script(
        path: &Path,
        dispatcher: &mut Dispatcher,
        console: &mut impl Console,
    ) {
        console.print("=== Executing Startup Script ===");
        match Script::from_path(path).await {
            Ok(script) => {
                let outcome = script.run(dispatcher, console);
                debug!("Startup script finished: {:?}", outcome);
            }
            Err(e) => console.print_error(&format!("Error reading script file: {e}")),
        }
        console.print("=== Script Execution Finished ===");
        console.print("");
    }
}

fn describe(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "not specified".to_string())
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigError },
    #[snafu(display("Critical failure encountered in the interactive session"))]
    ReplError { source: ReplError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::RecordingConsole;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{contents}").expect("Failed to write to temp file");
        file
    }

    #[compio::test]
    async fn loads_vfs_and_reports_success() {
        let manifest = temp_file("dir;/a;\n");
        let mut console = RecordingConsole::default();

        let tree = Application::load_vfs(manifest.path(), &mut console).await;

        assert_eq!(tree.map(|t| t.node_count()), Some(1));
        assert_eq!(console.lines.len(), 1);
        assert!(console.lines[0].starts_with("VFS loaded successfully from: "));
    }

    #[compio::test]
    async fn invalid_manifest_leaves_session_without_vfs() {
        let manifest = temp_file("dir;/a;\ndir;relative;\nfile;/b;x\n");
        let mut console = RecordingConsole::default();

        let tree = Application::load_vfs(manifest.path(), &mut console).await;

        assert!(tree.is_none());
        assert_eq!(
            console.errors(),
            ["Error loading VFS: Paths must be absolute (start with /), got 'relative' on line 2"]
        );
    }

    #[compio::test]
    async fn startup_script_runs_between_banners() {
        let script = temp_file("cd a\ncd nowhere\nls\n");
        let mut dispatcher =
            Dispatcher::new(Some(VfsTree::try_from("file;/a/b.txt;x\n").unwrap()));
        let mut console = RecordingConsole::default();

        Application::run_startup_script(script.path(), &mut dispatcher, &mut console).await;

        assert_eq!(
            console.lines,
            [
                "=== Executing Startup Script ===",
                "$ cd a",
                "$ cd nowhere",
                "error: cd: no such directory: nowhere",
                "Script execution stopped due to error.",
                "=== Script Execution Finished ===",
                "",
            ]
        );
        assert_eq!(dispatcher.prompt_path(), "/a");
    }

    #[compio::test]
    async fn unreadable_script_is_reported() {
        let mut dispatcher = Dispatcher::new(None);
        let mut console = RecordingConsole::default();

        Application::run_startup_script(
            Path::new("/no/such/script.txt"),
            &mut dispatcher,
            &mut console,
        )
        .await;

        assert_eq!(console.errors().len(), 1);
        assert!(console.errors()[0].starts_with("Error reading script file: "));
        assert_eq!(console.lines.last().map(String::as_str), Some(""));
    }
}
