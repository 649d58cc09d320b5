use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Interactive shell over a virtual filesystem loaded from a manifest.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Manifest describing the virtual filesystem (`kind;path;content` per line)
    #[clap(long)]
    pub vfs: Option<PathBuf>,

    /// Startup script replayed before the interactive session
    #[clap(long)]
    pub script: Option<PathBuf>,

    /// Configuration file [default: ./vfshell.yaml when present]
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths_and_level() {
        let cli = Cli::try_parse_from([
            "vfshell",
            "--vfs",
            "fs.csv",
            "--script",
            "start.txt",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.vfs, Some(PathBuf::from("fs.csv")));
        assert_eq!(cli.script, Some(PathBuf::from("start.txt")));
        assert_eq!(cli.config, None);
        assert!(matches!(cli.log_level, LogLevel::Debug));
    }

    #[test]
    fn everything_is_optional() {
        let cli = Cli::try_parse_from(["vfshell"]).unwrap();
        assert!(cli.vfs.is_none() && cli.script.is_none());
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }
}
