//! Command line handling on top of the virtual filesystem: tokenizing,
//! dispatching verbs, replaying startup scripts and the interactive loop.

mod console;
mod dispatcher;
mod repl;
mod script;
mod tokenizer;

pub use console::{Console, StdoutConsole};
pub use dispatcher::{CommandError, Dispatcher, Flow, Mode};
pub use repl::{Repl, ReplError};
pub use script::{Script, ScriptError, ScriptOutcome};
pub use tokenizer::{TokenizeError, tokenize};

#[cfg(test)]
pub(crate) use console::RecordingConsole;
