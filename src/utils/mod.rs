pub mod fs;
pub mod text;
pub mod time;

pub use fs::{read_to_string_lossy, validate_file_size};
pub use text::{make_preview, shorten};
pub use time::{format_timestamp, parse_date_from_path, parse_timestamp};
