mod shell_config;

pub use shell_config::{ConfigError, ShellConfig};
