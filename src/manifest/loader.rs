use std::path::Path;
use std::string::FromUtf8Error;

use compio::fs;
use snafu::prelude::*;
use tracing::debug;

use crate::ext::{LineExt, PathDisplayExt};
use crate::manifest::ManifestRecord;

/// Validated records of a manifest, in file order.
///
/// Comment and blank lines are skipped, as are records of unknown kind.
/// Line numbers in errors are 1-based and count every physical line.
pub fn records(contents: &str) -> impl Iterator<Item = Result<ManifestRecord, ManifestError>> + '_ {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_blank_or_comment())
        .filter_map(|(index, line)| ManifestRecord::parse(index + 1, line).transpose())
}

/// Reads a whole manifest file into memory.
pub async fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    debug!("Reading manifest file: {}", path.path_display());
    let bytes = fs::read(path).await.context(ReadSnafu {
        path: path.path_display(),
    })?;
    debug!("Read {} bytes of manifest", bytes.len());

    String::from_utf8(bytes).context(EncodingSnafu {
        path: path.path_display(),
    })
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ManifestError {
    #[snafu(display("Failed to read manifest file {}: {}", path, source))]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("Manifest file {} is not valid UTF-8", path))]
    EncodingError { path: String, source: FromUtf8Error },
    #[snafu(display(
        "Invalid manifest record on line {}: expected kind;path[;content], found {} field(s)",
        line_number,
        field_count
    ))]
    MalformedRecordError {
        line_number: usize,
        field_count: usize,
    },
    #[snafu(display(
        "Paths must be absolute (start with /), got '{}' on line {}",
        path,
        line_number
    ))]
    RelativePathError { line_number: usize, path: String },
    #[snafu(display("A file cannot replace the root directory (line {})", line_number))]
    RootFileError { line_number: usize },
}
