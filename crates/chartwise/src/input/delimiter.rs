//! Field separator detection for delimited text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lines inspected when detecting a delimiter.
const SAMPLE_LINES: usize = 5;

/// Supported field separators, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    /// Candidates tried by [`detect_delimiter`], in priority order.
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    /// The separator as a byte, for the CSV reader.
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }

    /// The separator as a character.
    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }

    /// Format name reported in source metadata.
    pub fn format_name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "csv",
            Delimiter::Tab => "tsv",
            Delimiter::Semicolon => "csv-semicolon",
            Delimiter::Pipe => "psv",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_name())
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "," | "comma" | "csv" => Ok(Delimiter::Comma),
            "\t" | "\\t" | "tab" | "tsv" => Ok(Delimiter::Tab),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "|" | "pipe" | "psv" => Ok(Delimiter::Pipe),
            _ => Err(format!(
                "Unknown delimiter: {}. Use comma, tab, semicolon, or pipe.",
                s
            )),
        }
    }
}

/// Detect the field separator from the first few lines of a text sample.
///
/// A candidate is consistent when every sampled line contains it the same,
/// non-zero number of times. The consistent candidate with the highest count
/// wins; earlier candidates win ties. Falls back to comma.
pub fn detect_delimiter(text: &str) -> Delimiter {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if lines.is_empty() {
        return Delimiter::default();
    }

    let mut best = Delimiter::default();
    let mut best_count = 0;

    for delimiter in Delimiter::CANDIDATES {
        let first = count_delimiter_in_line(lines[0], delimiter.as_char());
        if first == 0 {
            continue;
        }

        let consistent = lines
            .iter()
            .all(|line| count_delimiter_in_line(line, delimiter.as_char()) == first);

        if consistent && first > best_count {
            best_count = first;
            best = delimiter;
        }
    }

    best
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: char) -> usize {
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n4,5,6"), Delimiter::Comma);
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), Delimiter::Tab);
    }

    #[test]
    fn test_detect_semicolon_and_pipe() {
        assert_eq!(detect_delimiter("a;b\n1;2\n3;4"), Delimiter::Semicolon);
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), Delimiter::Pipe);
    }

    #[test]
    fn test_inconsistent_counts_fall_back_to_comma() {
        assert_eq!(detect_delimiter("a;b;c\n1;2\n3"), Delimiter::Comma);
        assert_eq!(detect_delimiter("no separators here"), Delimiter::Comma);
        assert_eq!(detect_delimiter(""), Delimiter::Comma);
    }

    #[test]
    fn test_highest_consistent_count_wins() {
        // Two commas per line but three tabs per line.
        let text = "a,b\tc\td,e\tf\n1,2\t3\t4,5\t6";
        assert_eq!(detect_delimiter(text), Delimiter::Tab);
    }

    #[test]
    fn test_trailing_newline_and_crlf() {
        assert_eq!(detect_delimiter("a\tb\r\n1\t2\r\n"), Delimiter::Tab);
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        let text = "name,city\n\"Smith, J\",Paris\n\"Doe, A\",Rome";
        assert_eq!(detect_delimiter(text), Delimiter::Comma);
    }

    #[test]
    fn test_only_first_five_lines_sampled() {
        let text = "a,b\n1,2\n3,4\n5,6\n7,8\n9,10,11,12";
        assert_eq!(detect_delimiter(text), Delimiter::Comma);
    }
}
