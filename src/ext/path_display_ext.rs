use std::path::{Path, PathBuf};

/// Renders a path for messages, preferring its canonical absolute form.
pub trait PathDisplayExt {
    fn path_display(&self) -> String;
}

impl PathDisplayExt for Path {
    fn path_display(&self) -> String {
        match self.canonicalize() {
            Ok(canonical) => canonical.display().to_string(),
            // Missing files keep the spelling the user gave us
            Err(_) => self.display().to_string(),
        }
    }
}

impl PathDisplayExt for PathBuf {
    fn path_display(&self) -> String {
        self.as_path().path_display()
    }
}
