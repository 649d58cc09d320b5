/// Line classification shared by the manifest loader and the script runner.
pub trait LineExt {
    /// True for lines that carry no record or command: blank after trimming,
    /// or starting with `#` once leading whitespace is removed.
    fn is_blank_or_comment(&self) -> bool;
}

impl LineExt for str {
    fn is_blank_or_comment(&self) -> bool {
        let trimmed = self.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    }
}
