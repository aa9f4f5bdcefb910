pub mod paths;
pub mod terminal;
pub mod timestamps;

pub use paths::format_path_with_tilde;
pub use terminal::{sanitize_for_display, truncate_chars};
pub use timestamps::format_age;
