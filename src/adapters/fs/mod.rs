pub mod reader;

pub use reader::JsonFileGraphSource;
