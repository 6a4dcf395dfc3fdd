pub mod errors;
pub mod format_selector;
pub mod metadata;
pub mod models;

pub use metadata::MetadataClient;
