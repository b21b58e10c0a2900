//! Delimited text parser producing dataset rows.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{ChartwiseError, Result};
use crate::schema::{Cell, Row};

use super::delimiter::{detect_delimiter, Delimiter};
use super::source::SourceMetadata;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<Delimiter>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Text decoded from raw file bytes.
#[derive(Debug, Clone)]
pub struct DecodedText<'a> {
    pub text: Cow<'a, str>,
    /// Name of the encoding that produced `text`.
    pub encoding: &'static str,
}

/// Decode file bytes as UTF-8, falling back to Windows-1256.
///
/// Spreadsheet exports from Persian/Arabic locales are commonly
/// Windows-1256; anything that is not valid UTF-8 is read that way.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText<'_> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text: Cow::Borrowed(text),
            encoding: "utf-8",
        },
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1256.decode(bytes);
            DecodedText {
                text,
                encoding: "windows-1256",
            }
        }
    }
}

/// Parses delimited text into rows of text cells.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return its rows and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Vec<Row>, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| ChartwiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let decoded = decode_bytes(&contents);
        let delimiter = self.resolve_delimiter(&decoded.text);
        let (headers, rows) = self.parse_records(&decoded.text, delimiter)?;

        tracing::debug!(
            path = %path.display(),
            encoding = decoded.encoding,
            delimiter = %delimiter,
            rows = rows.len(),
            columns = headers.len(),
            "Parsed delimited file"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            delimiter.format_name().to_string(),
            decoded.encoding.to_string(),
            rows.len(),
            headers.len(),
        );

        Ok((rows, metadata))
    }

    /// Parse in-memory text.
    pub fn parse_str(&self, text: &str) -> Result<Vec<Row>> {
        let delimiter = self.resolve_delimiter(text);
        let (_, rows) = self.parse_records(text, delimiter)?;
        Ok(rows)
    }

    fn resolve_delimiter(&self, text: &str) -> Delimiter {
        self.config
            .delimiter
            .unwrap_or_else(|| detect_delimiter(text))
    }

    /// Read records, build unique headers, and project each record onto them.
    fn parse_records(&self, text: &str, delimiter: Delimiter) -> Result<(Vec<String>, Vec<Row>)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let first = match records.next() {
            Some(record) => record?,
            None => return Err(ChartwiseError::EmptyData("No lines found".to_string())),
        };

        let (headers, first_data) = if self.config.has_header {
            (unique_headers(first.iter()), None)
        } else {
            let names = (0..first.len()).map(|i| format!("column_{}", i + 1)).collect();
            (names, Some(first))
        };

        if headers.is_empty() {
            return Err(ChartwiseError::EmptyData("No columns found".to_string()));
        }

        let mut rows = Vec::new();
        for result in first_data.into_iter().map(Ok).chain(records) {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let record = result?;
            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = record.get(idx).map(str::trim).unwrap_or("");
                    (header.clone(), Cell::from(value))
                })
                .collect();
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ChartwiseError::EmptyData("No data rows found".to_string()));
        }

        Ok((headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim header names, name blank ones by position and suffix repeats.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();

    for (idx, name) in raw.enumerate() {
        let base = match name.trim() {
            "" => format!("column_{}", idx + 1),
            trimmed => trimmed.to_string(),
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while headers.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        headers.push(candidate);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let rows = parser.parse_str("name,age,city\nAlice,30,NYC\nBob,25,LA").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["name", "age", "city"]
        );
        assert_eq!(rows[0]["name"], Cell::from("Alice"));
        assert_eq!(rows[1]["age"], Cell::from("25"));
    }

    #[test]
    fn test_short_records_are_padded() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(Delimiter::Tab),
            ..ParserConfig::default()
        });
        let rows = parser.parse_str("a\tb\tc\n1\t2\t3\n4\t5").unwrap();

        assert_eq!(rows[1]["c"], Cell::from(""));
        assert!(rows[1]["c"].is_missing());
    }

    #[test]
    fn test_values_are_trimmed() {
        let parser = Parser::new();
        let rows = parser.parse_str("a,b\n 1 , x \n2,y").unwrap();
        assert_eq!(rows[0]["a"], Cell::from("1"));
        assert_eq!(rows[0]["b"], Cell::from("x"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let parser = Parser::new();
        let err = parser.parse_str("a,b,c\n").unwrap_err();
        assert!(matches!(err, ChartwiseError::EmptyData(_)));
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let headers = unique_headers(["id", "", "id", "id"].into_iter());
        assert_eq!(headers, vec!["id", "column_2", "id_2", "id_3"]);
    }

    #[test]
    fn test_without_header_row() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let rows = parser.parse_str("1,2\n3,4").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["column_1"], Cell::from("1"));
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let rows = parser.parse_str("a\n1\n2\n3").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_decode_falls_back_to_windows_1256() {
        let utf8 = decode_bytes("\u{FEFF}a,b".as_bytes());
        assert_eq!(utf8.encoding, "utf-8");
        assert_eq!(utf8.text, "a,b");

        // 0xC8 is ARABIC LETTER BEH in Windows-1256 and invalid as lone UTF-8.
        let legacy = decode_bytes(&[b'a', b',', 0xC8]);
        assert_eq!(legacy.encoding, "windows-1256");
        assert_eq!(legacy.text, "a,\u{0628}");
    }
}
