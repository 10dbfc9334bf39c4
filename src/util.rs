pub mod matcher;
pub mod pretty_format;
