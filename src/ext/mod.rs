mod line_ext;
mod path_display_ext;

pub use line_ext::LineExt;
pub use path_display_ext::PathDisplayExt;
