pub mod dir_scan;
pub mod manifest;
