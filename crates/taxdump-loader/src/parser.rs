//! Generic taxonomy dump parser.
//!
//! Provides a streaming parser for the `\t|\t`-delimited `.dmp` files of the
//! NCBI taxdump distribution. Every row is split into its columns and checked
//! against the column counts the record layout accepts before any field is
//! read, so short or long rows are rejected instead of silently misaligned.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;

use crate::types::{TaxdumpError, TaxdumpResult};

/// Trait for types that can be parsed from a dump row.
pub trait DmpRecord: Sized {
    /// Column counts this record layout accepts.
    const FIELD_COUNTS: &'static [usize];

    /// Parses a record from its columns.
    ///
    /// Callers guarantee `fields.len()` is one of `FIELD_COUNTS`.
    fn from_fields(fields: &[&str]) -> TaxdumpResult<Self>;
}

/// Splits and validates a row, then parses it.
pub fn parse_fields<T: DmpRecord>(fields: &[&str], line: u64) -> TaxdumpResult<T> {
    if !T::FIELD_COUNTS.contains(&fields.len()) {
        return Err(TaxdumpError::InvalidFieldCount {
            line,
            expected: T::FIELD_COUNTS
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" or "),
            found: fields.len(),
        });
    }
    T::from_fields(fields)
}

/// Strips the tab padding around `|`-separated columns.
///
/// Rows end with the `\t|` terminator, which leaves one empty trailing piece
/// that is not a column.
pub fn normalize_fields<'a, I>(pieces: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields: Vec<&str> = pieces
        .into_iter()
        .map(|piece| {
            let piece = piece.strip_prefix('\t').unwrap_or(piece);
            piece.strip_suffix('\t').unwrap_or(piece)
        })
        .collect();
    if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Splits a single dump line into columns.
pub fn split_dmp_line(line: &str) -> Vec<&str> {
    normalize_fields(line.trim_end_matches(['\n', '\r']).split('|'))
}

/// Opens a dump file, decompressing it when the name ends in `.gz`.
pub fn open_dump<P: AsRef<Path>>(path: P) -> TaxdumpResult<Box<dyn Read + Send>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// A streaming parser for dump files.
///
/// This parser reads dump files row-by-row to avoid loading entire files
/// into memory. Malformed rows are yielded as errors; callers decide whether
/// to skip them.
pub struct DmpParser<R: Read, T: DmpRecord> {
    reader: Reader<R>,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<T: DmpRecord> DmpParser<Box<dyn Read + Send>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> TaxdumpResult<Self> {
        Ok(Self::from_reader(open_dump(path)?))
    }
}

impl<R: Read, T: DmpRecord> DmpParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R) -> Self {
        let csv_reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self {
            reader: csv_reader,
            records_read: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of rows read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }
}

impl<R: Read, T: DmpRecord> Iterator for DmpParser<R, T> {
    type Item = TaxdumpResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    // Skip blank rows
                    if record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }
                    self.records_read += 1;

                    let line = record.position().map(|p| p.line()).unwrap_or(0);
                    let fields = normalize_fields(record.iter());
                    return Some(parse_fields(&fields, line));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Reads all non-blank lines of a dump file into memory, with their
/// 1-based line numbers.
pub fn read_lines<P: AsRef<Path>>(path: P) -> TaxdumpResult<Vec<(u64, String)>> {
    let reader = BufReader::new(open_dump(path)?);
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((index as u64 + 1, line));
        }
    }
    Ok(lines)
}

/// Helper functions for parsing dump field values.
pub mod parse {
    use super::{TaxdumpError, TaxdumpResult};
    use taxdump_types::{GiDatabase, TaxId};

    /// Parses a taxon ID, which must be a non-empty run of ASCII digits.
    pub fn tax_id(value: &str) -> TaxdumpResult<TaxId> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TaxdumpError::InvalidTaxId {
                value: value.to_string(),
            });
        }
        Ok(value.to_string())
    }

    /// Parses a flag from "0" or "1".
    pub fn flag(value: &str) -> TaxdumpResult<bool> {
        match value {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(TaxdumpError::InvalidFlag {
                value: value.to_string(),
            }),
        }
    }

    /// Parses an integer value.
    pub fn integer<T: std::str::FromStr>(value: &str) -> TaxdumpResult<T> {
        value.parse::<T>().map_err(|_| TaxdumpError::InvalidInteger {
            value: value.to_string(),
        })
    }

    /// Parses a GI database code ("nucl" or "prot").
    pub fn gi_database(code: &str) -> TaxdumpResult<GiDatabase> {
        GiDatabase::from_code(code).ok_or_else(|| TaxdumpError::UnsupportedDatabaseType {
            value: code.to_string(),
        })
    }
}
