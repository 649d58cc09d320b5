//! Flat-file manifest describing the virtual filesystem.
//!
//! One record per line, `kind;absolute_path;content`, with `;` as the field
//! delimiter outside double-quoted regions and `""` standing for a literal
//! quote inside them. Blank lines and `#` comments are skipped.

mod fields;
mod loader;
mod record;

pub use fields::split_fields;
pub use loader::{ManifestError, read_manifest, records};
pub use record::{ManifestRecord, RecordKind};
