use derive_more::Display;
use snafu::prelude::*;
use tracing::warn;

use crate::filesystem::SEPARATOR;
use crate::manifest::loader::{MalformedRecordSnafu, RelativePathSnafu, RootFileSnafu};
use crate::manifest::{ManifestError, split_fields};

/// Kind column of a manifest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RecordKind {
    #[display("file")]
    File,
    #[display("dir")]
    Directory,
}

impl RecordKind {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "file" => Some(RecordKind::File),
            "dir" => Some(RecordKind::Directory),
            _ => None,
        }
    }
}

/// One validated manifest line, ready to be applied to a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    kind: RecordKind,
    path: String,
    content: String,
}

impl ManifestRecord {
    pub fn new(kind: RecordKind, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
        }
    }

    /// Parses and validates one non-comment line. The content column may be
    /// omitted and then defaults to empty.
    ///
    /// Returns `Ok(None)` for records of an unknown kind, which are skipped.
    pub fn parse(line_number: usize, line: &str) -> Result<Option<Self>, ManifestError> {
        let fields = split_fields(line);
        let (kind, path, content) = match fields.as_slice() {
            [kind, path] => (kind, path, ""),
            [kind, path, content, ..] => (kind, path, content.as_str()),
            _ => {
                return MalformedRecordSnafu {
                    line_number,
                    field_count: fields.len(),
                }
                .fail();
            }
        };

        let path = path.trim();
        ensure!(
            path.starts_with(SEPARATOR),
            RelativePathSnafu { line_number, path }
        );

        let Some(kind) = RecordKind::from_field(kind.trim()) else {
            warn!(
                "Skipping record with unknown kind '{}' on line {}",
                kind.trim(),
                line_number
            );
            return Ok(None);
        };

        let record = ManifestRecord::new(kind, path, content.trim());
        ensure!(
            kind != RecordKind::File || record.segments().next().is_some(),
            RootFileSnafu { line_number }
        );

        Ok(Some(record))
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Non-empty path segments below the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(SEPARATOR).filter(|segment| !segment.is_empty())
    }
}
