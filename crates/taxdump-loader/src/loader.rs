//! Taxonomy dump file discovery.

use std::path::{Path, PathBuf};

use taxdump_types::well_known::{DIVISION_FILE, NAMES_FILE, NODES_FILE};
use taxdump_types::GiDatabase;

use crate::types::{TaxdumpError, TaxdumpFiles, TaxdumpResult};

/// Discovers dump files in a taxonomy directory.
///
/// Each table may be stored plain or gzip-compressed; the plain file wins
/// when both exist. Fails with `MissingReferenceFile` naming every missing
/// table if nodes, names or divisions cannot be found.
pub fn discover_taxdump_files<P: AsRef<Path>>(path: P) -> TaxdumpResult<TaxdumpFiles> {
    let dir = path.as_ref();

    if !dir.is_dir() {
        return Err(TaxdumpError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut files = TaxdumpFiles::new(dir);
    files.nodes_file = find_dump(dir, NODES_FILE);
    files.names_file = find_dump(dir, NAMES_FILE);
    files.division_file = find_dump(dir, DIVISION_FILE);
    files.gi_nucl_file = find_exact(dir, &GiDatabase::Nucleotide.file_name());
    files.gi_prot_file = find_exact(dir, &GiDatabase::Protein.file_name());

    if !files.has_required_files() {
        return Err(TaxdumpError::MissingReferenceFile {
            file: files.missing_files().join(", "),
            directory: dir.display().to_string(),
        });
    }

    Ok(files)
}

/// Locates a single dump table, plain or gzip-compressed.
///
/// # Errors
/// Returns `MissingReferenceFile` if neither form exists.
pub fn require_dump<P: AsRef<Path>>(dir: P, file_name: &str) -> TaxdumpResult<PathBuf> {
    let dir = dir.as_ref();
    find_dump(dir, file_name).ok_or_else(|| TaxdumpError::MissingReferenceFile {
        file: file_name.to_string(),
        directory: dir.display().to_string(),
    })
}

fn find_dump(dir: &Path, file_name: &str) -> Option<PathBuf> {
    find_exact(dir, file_name).or_else(|| find_exact(dir, &format!("{file_name}.gz")))
}

fn find_exact(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let candidate = dir.join(file_name);
    candidate.is_file().then_some(candidate)
}
