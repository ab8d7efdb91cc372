pub mod json;
pub mod manifest;

pub use json::JsonFormatter;
pub use manifest::ManifestFormatter;
