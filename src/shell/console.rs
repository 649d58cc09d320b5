use colored::Colorize;
use supports_color::Stream;

/// Receives the lines produced by commands and the startup sequence.
pub trait Console {
    fn print(&mut self, line: &str);
    fn print_error(&mut self, line: &str);
}

/// Console writing to standard output, with red error lines when the
/// terminal supports color.
#[derive(Debug, Clone, Copy)]
pub struct StdoutConsole {
    color: bool,
}

impl StdoutConsole {
    pub fn detect() -> Self {
        StdoutConsole {
            color: supports_color::on(Stream::Stdout).is_some(),
        }
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }
}

impl Console for StdoutConsole {
    fn print(&mut self, line: &str) {
        println!("{line}");
    }

    fn print_error(&mut self, line: &str) {
        if self.color {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

/// Captures everything written, errors marked with an `error: ` prefix.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingConsole {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl RecordingConsole {
    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| line.strip_prefix("error: "))
            .collect()
    }
}

#[cfg(test)]
impl Console for RecordingConsole {
    fn print(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn print_error(&mut self, line: &str) {
        self.lines.push(format!("error: {line}"));
    }
}
