//! Table loaders for the product catalog and rating log.
//!
//! Each table record implements `TableRecord`; the generic parser reads CSV
//! or JSON, validates every row and collects per-row `ParseError`s instead of
//! failing the whole file on one bad record.
//!
//! Identifiers are text. CSV cells are taken verbatim (after trimming), so
//! `007` and `7` stay distinct. JSON may carry ids as bare integers; those are
//! rewritten to their literal digits before the row is deserialized.

pub mod dataset;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;

/// Result of parsing one table file.
#[derive(Debug)]
pub struct ParseResult<T> {
    pub records: Vec<ParsedRecord<T>>,
    pub errors: Vec<ParseError>,
}

/// An accepted row and its zero-based position among the file's data rows.
#[derive(Debug)]
pub struct ParsedRecord<T> {
    pub record_index: usize,
    pub record: T,
}

/// Error encountered while parsing an individual record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub record_index: usize,
    pub field: String,
    pub message: String,
}

/// Input format for table data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A row type that can be loaded from a table file.
pub trait TableRecord: DeserializeOwned {
    /// Table name used in log messages.
    const TABLE: &'static str;

    /// Columns holding identifiers.
    const ID_FIELDS: &'static [&'static str];

    /// Row-level checks applied after deserialization.
    fn validate(&self) -> Result<(), String>;
}

impl TableRecord for ProductRecord {
    const TABLE: &'static str = "products";
    const ID_FIELDS: &'static [&'static str] = &["product_id"];

    fn validate(&self) -> Result<(), String> {
        ProductRecord::validate(self)
    }
}

impl TableRecord for RatingRecord {
    const TABLE: &'static str = "ratings";
    const ID_FIELDS: &'static [&'static str] = &["user_id", "product_id"];

    fn validate(&self) -> Result<(), String> {
        RatingRecord::validate(self)
    }
}

/// Parse raw table bytes in the given format.
pub fn parse_table<T: TableRecord>(
    data: &[u8],
    format: InputFormat,
) -> Result<ParseResult<T>, anyhow::Error> {
    match format {
        InputFormat::Json => parse_json(data),
        InputFormat::Csv => parse_csv(data),
    }
}

fn parse_json<T: TableRecord>(data: &[u8]) -> Result<ParseResult<T>, anyhow::Error> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(data)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (i, mut row) in rows.into_iter().enumerate() {
        if let Err((field, message)) = ids_as_text(&mut row, T::ID_FIELDS) {
            errors.push(ParseError {
                record_index: i,
                field,
                message,
            });
            continue;
        }
        match serde_json::from_value::<T>(row) {
            Ok(record) => accept(record, i, &mut records, &mut errors),
            Err(e) => errors.push(ParseError {
                record_index: i,
                field: "json_row".to_string(),
                message: format!("JSON parse error: {e}"),
            }),
        }
    }

    Ok(ParseResult { records, errors })
}

fn parse_csv<T: TableRecord>(data: &[u8]) -> Result<ParseResult<T>, anyhow::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (i, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(record) => accept(record, i, &mut records, &mut errors),
            Err(e) => errors.push(ParseError {
                record_index: i,
                field: "csv_row".to_string(),
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    Ok(ParseResult { records, errors })
}

/// Rewrite integer ids in a JSON row to text and trim string ids.
///
/// Numbers keep their literal digits (serde_json is built with
/// `arbitrary_precision`), so ids wider than 64 bits survive intact.
fn ids_as_text(
    row: &mut serde_json::Value,
    fields: &[&str],
) -> Result<(), (String, String)> {
    let Some(object) = row.as_object_mut() else {
        return Ok(());
    };
    for &field in fields {
        let text = match object.get(field) {
            Some(serde_json::Value::Number(n)) => {
                let literal = n.to_string();
                let digits = literal.strip_prefix('-').unwrap_or(&literal);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err((
                        field.to_string(),
                        format!("{field} {literal} is not an integer"),
                    ));
                }
                literal
            }
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            _ => continue,
        };
        object.insert(field.to_string(), serde_json::Value::String(text));
    }
    Ok(())
}

fn accept<T: TableRecord>(
    record: T,
    index: usize,
    records: &mut Vec<ParsedRecord<T>>,
    errors: &mut Vec<ParseError>,
) {
    match record.validate() {
        Ok(()) => records.push(ParsedRecord {
            record_index: index,
            record,
        }),
        Err(message) => errors.push(ParseError {
            record_index: index,
            field: T::TABLE.to_string(),
            message,
        }),
    }
}
