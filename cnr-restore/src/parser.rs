//! Nomination export parsing
//!
//! The export is comma-delimited, one candidate per line after a header
//! line. A field may be wrapped in double quotes, in which case it can hold
//! commas and `""`-escaped quotes. Parsing never fails: malformed quoting
//! degrades to a best-effort string.
//!
//! Column layout: `[ignored, district, constituency ordinal, party, name, ...]`

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Minimum token count for a usable line (leading ignored column included)
pub const MIN_FIELDS: usize = 5;

/// Candidate data carried by one export line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub district: String,
    pub ordinal: String,
    pub party_name: String,
    pub name: String,
}

impl SourceRecord {
    /// Build from parsed fields; `None` when the line is too short
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            district: fields[1].clone(),
            ordinal: fields[2].clone(),
            party_name: fields[3].clone(),
            name: fields[4].clone(),
        })
    }
}

/// Split one line into normalized field values
pub fn parse_line(line: &str) -> Vec<String> {
    split_tokens(line).into_iter().map(normalize_field).collect()
}

/// Split on commas that are outside double quotes
///
/// Quotes are kept in the returned tokens. A doubled quote toggles the quote
/// state twice, so it never ends a quoted section.
pub fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                tokens.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&line[start..]);

    tokens
}

/// Normalize a raw token into its field value
///
/// Strips a leftover leading comma, one pair of surrounding quotes, collapses
/// `""` to `"` and trims whitespace.
pub fn normalize_field(token: &str) -> String {
    let mut field = token.trim();

    if let Some(rest) = field.strip_prefix(',') {
        field = rest.trim_start();
    }

    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field = &field[1..field.len() - 1];
    } else if let Some(rest) = field.strip_prefix('"') {
        // Unterminated quote: keep the content
        if !rest.contains('"') {
            field = rest;
        }
    }

    field.replace("\"\"", "\"").trim().to_string()
}

/// One physical line of the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the file (the header is line 1)
    pub line_number: usize,
    pub text: String,
}

/// Sequential line reader over the export byte stream
///
/// The header line is discarded. Invalid UTF-8 is replaced rather than
/// rejected; only I/O failures surface as errors.
pub struct SourceReader<R> {
    reader: R,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> SourceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Number of physical lines consumed so far (header included)
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Next data line, or `None` at end of stream
    pub async fn next_line(&mut self) -> std::io::Result<Option<SourceLine>> {
        if self.line_number == 0 {
            // Header
            if self.read_raw().await?.is_none() {
                return Ok(None);
            }
        }

        Ok(self.read_raw().await?.map(|text| SourceLine {
            line_number: self.line_number,
            text,
        }))
    }

    async fn read_raw(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf).await?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut end = self.buf.len();
        while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
            end -= 1;
        }

        Ok(Some(String::from_utf8_lossy(&self.buf[..end]).into_owned()))
    }
}
