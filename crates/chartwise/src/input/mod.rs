//! Input parsing and data source handling.

mod delimiter;
mod parser;
mod source;

pub use delimiter::{detect_delimiter, Delimiter};
pub use parser::{decode_bytes, DecodedText, Parser, ParserConfig};
pub use source::SourceMetadata;
