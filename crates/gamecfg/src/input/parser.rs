//! Line-oriented CSV tokenizer for configuration tables.
//!
//! Documents are split on raw `\n` before any quote handling, so a quoted
//! field can never span lines. Inside a line, double-quoted fields may
//! contain the delimiter and `""` decodes to a single `"`. Field values are
//! trimmed of surrounding whitespace.

use serde::{Deserialize, Serialize};

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Number of header rows before the data region (1 or 3 in practice).
    pub header_rows: usize,
    /// Field delimiter.
    pub delimiter: char,
    /// Quote character.
    pub quote: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_rows: 3,
            delimiter: ',',
            quote: '"',
        }
    }
}

/// One tokenized line, with a flag for the unterminated-quote leniency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub fields: Vec<String>,
    /// The line ended while still inside a quoted field.
    pub unterminated_quote: bool,
}

/// A document split into its header block and data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Header rows, in document order.
    pub header_rows: Vec<Vec<String>>,
    /// Data rows with blank lines removed.
    pub data_rows: Vec<Vec<String>>,
    /// Fewer lines than `header_rows + 1`; `data_rows` is empty.
    pub malformed: bool,
    /// Number of lines that ended inside an open quote.
    pub unterminated_quotes: usize,
}

impl ParsedDocument {
    /// The header row holding field names.
    ///
    /// Row 1 of a three-row block (comment, name, type), otherwise row 0.
    /// `None` when the document was parsed without a header.
    pub fn field_names(&self) -> Option<&[String]> {
        let row = if self.header_rows.len() >= 3 { 1 } else { 0 };
        self.header_rows.get(row).map(Vec::as_slice)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.data_rows.len()
    }
}

/// Tokenizes configuration CSV text.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: ParserConfig,
}

impl CsvParser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Split one line into trimmed fields.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        self.parse_line_checked(line).fields
    }

    /// Split one line into fields, reporting an unterminated quote.
    ///
    /// An open quote at end-of-line closes the field rather than failing.
    pub fn parse_line_checked(&self, line: &str) -> ParsedLine {
        let quote = self.config.quote;
        let delimiter = self.config.delimiter;

        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if c == quote {
                if in_quotes && chars.peek() == Some(&quote) {
                    current.push(quote);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if c == delimiter && !in_quotes {
                fields.push(current.trim().to_string());
                current.clear();
            } else {
                current.push(c);
            }
        }

        fields.push(current.trim().to_string());

        ParsedLine {
            fields,
            unterminated_quote: in_quotes,
        }
    }

    /// Split a whole document into header rows and data rows.
    pub fn parse_document(&self, text: &str) -> ParsedDocument {
        let header_count = self.config.header_rows;
        let lines: Vec<&str> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();

        // A trailing newline produces one empty final segment; it is not a line.
        let line_count = match lines.last() {
            Some(last) if last.is_empty() => lines.len() - 1,
            _ => lines.len(),
        };

        if line_count < header_count + 1 {
            tracing::warn!(
                lines = line_count,
                header_rows = header_count,
                "document too short for its header block"
            );
            let mut unterminated = 0;
            let header_rows = lines[..line_count]
                .iter()
                .map(|line| {
                    let parsed = self.parse_line_checked(line);
                    unterminated += usize::from(parsed.unterminated_quote);
                    parsed.fields
                })
                .collect();
            return ParsedDocument {
                header_rows,
                data_rows: Vec::new(),
                malformed: true,
                unterminated_quotes: unterminated,
            };
        }

        let mut doc = ParsedDocument::default();

        for (idx, line) in lines[..line_count].iter().enumerate() {
            if idx >= header_count && line.trim().is_empty() {
                continue;
            }

            let parsed = self.parse_line_checked(line);
            if parsed.unterminated_quote {
                doc.unterminated_quotes += 1;
                tracing::warn!(line = idx + 1, "unterminated quote closed at end of line");
            }

            if idx < header_count {
                doc.header_rows.push(parsed.fields);
            } else {
                doc.data_rows.push(parsed.fields);
            }
        }

        tracing::debug!(
            header_rows = doc.header_rows.len(),
            data_rows = doc.data_rows.len(),
            "parsed document"
        );

        doc
    }
}

/// Split one line with the default comma/double-quote rules.
pub fn parse_line(line: &str) -> Vec<String> {
    CsvParser::new().parse_line(line)
}

/// Split a document with the default rules and the given header row count.
pub fn parse_document(text: &str, header_row_count: usize) -> ParsedDocument {
    CsvParser::with_config(ParserConfig {
        header_rows: header_row_count,
        ..ParserConfig::default()
    })
    .parse_document(text)
}
