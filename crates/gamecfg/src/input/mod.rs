//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{CsvParser, ParsedDocument, ParsedLine, ParserConfig, parse_document, parse_line};
pub use source::{
    DirectoryProvider, FileProvider, MemoryProvider, Resource, SourceMetadata, content_hash,
};
