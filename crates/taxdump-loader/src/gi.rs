//! GI-to-taxon mapping readers.
//!
//! Reads the legacy `gi_taxid_nucl.dmp.gz` and `gi_taxid_prot.dmp.gz` files,
//! two tab-separated columns `gi<TAB>tax_id` per line.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use taxdump_types::{GiDatabase, TaxId};

use crate::parser::{open_dump, parse};
use crate::types::{TaxdumpError, TaxdumpResult};

/// Reads the GI mapping of `db` in `directory` as gi -> taxon ID.
///
/// # Errors
/// Returns `MissingReferenceFile` if the mapping file does not exist.
pub fn read_gi_taxid<P: AsRef<Path>>(
    directory: P,
    db: GiDatabase,
) -> TaxdumpResult<HashMap<String, TaxId>> {
    let mut map = HashMap::new();
    let rejected = for_each_pair(open_gi_file(directory.as_ref(), db)?, |gi, tax_id| {
        map.insert(gi, tax_id);
    })?;
    tracing::debug!(
        db = db.code(),
        entries = map.len(),
        rejected,
        "loaded gi -> taxid map"
    );
    Ok(map)
}

/// Reads the GI mapping of `db` in `directory` as taxon ID -> GIs.
///
/// One taxon usually has many GIs; they are kept in file order.
///
/// # Errors
/// Returns `MissingReferenceFile` if the mapping file does not exist.
pub fn read_taxid_gi<P: AsRef<Path>>(
    directory: P,
    db: GiDatabase,
) -> TaxdumpResult<HashMap<TaxId, Vec<String>>> {
    let mut map: HashMap<TaxId, Vec<String>> = HashMap::new();
    let rejected = for_each_pair(open_gi_file(directory.as_ref(), db)?, |gi, tax_id| {
        map.entry(tax_id).or_default().push(gi);
    })?;
    tracing::debug!(
        db = db.code(),
        taxa = map.len(),
        rejected,
        "loaded taxid -> gi map"
    );
    Ok(map)
}

/// Like [`read_gi_taxid`], with the database given by its code.
///
/// # Errors
/// Returns `UnsupportedDatabaseType` unless `code` is `nucl` or `prot`.
pub fn read_gi_taxid_by_code<P: AsRef<Path>>(
    directory: P,
    code: &str,
) -> TaxdumpResult<HashMap<String, TaxId>> {
    read_gi_taxid(directory, parse::gi_database(code)?)
}

/// Like [`read_taxid_gi`], with the database given by its code.
///
/// # Errors
/// Returns `UnsupportedDatabaseType` unless `code` is `nucl` or `prot`.
pub fn read_taxid_gi_by_code<P: AsRef<Path>>(
    directory: P,
    code: &str,
) -> TaxdumpResult<HashMap<TaxId, Vec<String>>> {
    read_taxid_gi(directory, parse::gi_database(code)?)
}

fn open_gi_file(directory: &Path, db: GiDatabase) -> TaxdumpResult<Box<dyn Read + Send>> {
    let file_name = db.file_name();
    let path = directory.join(&file_name);
    if !path.is_file() {
        return Err(TaxdumpError::MissingReferenceFile {
            file: file_name,
            directory: directory.display().to_string(),
        });
    }
    open_dump(path)
}

/// Feeds every well-formed `(gi, tax_id)` pair to `sink`.
///
/// Rows without exactly two columns, or with non-numeric values, are
/// rejected and counted.
fn for_each_pair<R, F>(reader: R, mut sink: F) -> TaxdumpResult<usize>
where
    R: Read,
    F: FnMut(String, TaxId),
{
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut record = StringRecord::new();
    let mut rejected = 0usize;
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match parse_pair(&record, line) {
            Ok((gi, tax_id)) => sink(gi, tax_id),
            Err(e) => {
                rejected += 1;
                tracing::warn!(line, error = %e, "rejecting gi mapping row");
            }
        }
    }
    Ok(rejected)
}

fn parse_pair(record: &StringRecord, line: u64) -> TaxdumpResult<(String, TaxId)> {
    if record.len() != 2 {
        return Err(TaxdumpError::InvalidFieldCount {
            line,
            expected: "2".to_string(),
            found: record.len(),
        });
    }
    Ok((parse::tax_id(&record[0])?, parse::tax_id(&record[1])?))
}
