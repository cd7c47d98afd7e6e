//! CSV parsing with encoding and delimiter auto-detection.
//!
//! Two consumers with different needs share this module:
//!
//! - the product shaper wants rows as JSON objects keyed by header
//!   ([`parse_csv_file_auto`] → [`ParseResult`]);
//! - the content sanitizer rewrites one column in place and needs the
//!   table positionally, with a faithful writer ([`read_table`] → [`Table`]).
//!
//! Record parsing is delegated to the `csv` crate: product descriptions
//! carry quoted cells with embedded delimiters and newlines, which a
//! line-based splitter would corrupt.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records as JSON objects.
    pub records: Vec<Value>,
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
    /// Column headers.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _confidence, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Decoding is strict: undecodable byte sequences are an error rather
/// than replacement characters, so a corrupt file fails loudly instead
/// of silently garbling product text.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let codec = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252
        }
        _ => encoding_rs::UTF_8,
    };

    let (decoded, _, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(CsvError::EncodingError(encoding.to_string()));
    }
    Ok(decoded.into_owned())
}

/// Detect the delimiter by counting candidate occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV content into JSON objects with an explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers. Rows
/// with fewer fields than headers are padded with empty strings; extra
/// fields are ignored.
///
/// # Example
/// ```ignore
/// let rows = parse_csv("name,age\nAlice,30\nBob,25", ',').unwrap();
/// assert_eq!(rows[0]["name"], "Alice");
/// assert_eq!(rows[1]["age"], "25");
/// ```
pub fn parse_csv(content: &str, delimiter: char) -> CsvResult<Vec<Value>> {
    let (headers, records) = read_records(content, delimiter)?;
    Ok(rows_to_objects(&headers, &records))
}

/// Zip raw rows with headers into JSON objects.
fn rows_to_objects(headers: &[String], records: &[Vec<String>]) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let mut obj = Map::new();
            for (i, header) in headers.iter().enumerate() {
                obj.insert(header.clone(), json!(record.get(i).map(String::as_str).unwrap_or("")));
            }
            Value::Object(obj)
        })
        .collect()
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    let (headers, raw_rows) = read_records(&content, delimiter)?;
    let records = rows_to_objects(&headers, &raw_rows);

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

// =============================================================================
// Positional tables (for in-place rewriting)
// =============================================================================

/// A table held positionally, for rewriting a single column in place.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: char,
    pub encoding: String,
}

impl Table {
    /// Index of a column by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Serialize the table back to CSV text (UTF-8, same delimiter).
    ///
    /// Serialization goes through an in-memory buffer so callers can
    /// fully transform before any bytes touch the original file.
    pub fn to_csv_string(&self) -> CsvResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter as u8)
            .flexible(true)
            .from_writer(Vec::new());

        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| CsvError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|_| CsvError::EncodingError("utf-8".to_string()))
    }
}

/// Read a CSV file into a positional [`Table`], auto-detecting encoding
/// and delimiter.
pub fn read_table<P: AsRef<Path>>(path: P) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    let (headers, rows) = read_records(&content, delimiter)?;

    Ok(Table {
        headers,
        rows,
        delimiter,
        encoding,
    })
}

/// Shared reader: headers plus raw rows.
fn read_records(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Vec<String>>)> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok((headers, rows))
}
