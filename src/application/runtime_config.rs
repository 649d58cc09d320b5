use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::ShellConfig;

const FALLBACK_USER: &str = "user";
const FALLBACK_HOST: &str = "localhost";

/// Settings for one session: command line values win over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub vfs: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub user: String,
    pub host: String,
}

impl RuntimeConfig {
    pub fn new(cli: Cli, config: ShellConfig) -> Self {
        Self {
            vfs: cli.vfs.or(config.vfs),
            script: cli.script.or(config.script),
            user: config
                .user
                .or_else(|| env_value(&["USER", "USERNAME"]))
                .unwrap_or_else(|| FALLBACK_USER.to_string()),
            host: config
                .host
                .or_else(|| env_value(&["HOSTNAME", "COMPUTERNAME"]))
                .unwrap_or_else(|| FALLBACK_HOST.to_string()),
        }
    }
}

fn env_value(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
}
