pub mod args;
pub mod error;
pub mod parser;
pub mod reader;
pub mod stats;
pub mod summary;
pub mod utils;

pub use args::Args;
pub use error::ParseError;
pub use parser::LogFileParser;
pub use reader::ChunkedLineReader;
pub use stats::{AggregationState, PageStats};
pub use summary::{render, Summary};
