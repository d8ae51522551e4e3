pub mod commands;
pub mod error;
pub mod utils;

pub use commands::generate::generate_manifests;
pub use error::ScanError;
