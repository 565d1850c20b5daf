pub mod fs;
pub mod manifest;
