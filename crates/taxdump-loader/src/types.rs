//! Loader-specific types for taxonomy dump processing.

use std::path::{Path, PathBuf};

use taxdump_types::well_known::{DIVISION_FILE, NAMES_FILE, NODES_FILE};
use taxdump_types::{GiDatabase, NameClass};
use thiserror::Error;

/// Environment variable naming the default dump directory.
pub const TAXONOMY_DIR_ENV: &str = "NCBI_TAXONOMY_DIR";

/// Directory used when neither a path nor the environment variable is given.
pub const DEFAULT_TAXONOMY_DIR: &str = "taxonomy";

/// Errors that can occur while reading taxonomy dump files.
#[derive(Error, Debug)]
pub enum TaxdumpError {
    /// I/O error reading a dump file.
    #[error("IO error reading dump file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required dump file missing from the data directory.
    #[error("Required taxonomy file not found: {file} in {directory}")]
    MissingReferenceFile {
        /// The file (or files) that were missing.
        file: String,
        /// The directory that was searched.
        directory: String,
    },

    /// Row has a column count the record layout does not accept.
    #[error("Line {line}: expected {expected} columns, found {found}")]
    InvalidFieldCount {
        /// 1-based line number in the source file.
        line: u64,
        /// Accepted column counts.
        expected: String,
        /// Column count found.
        found: usize,
    },

    /// Invalid taxon ID.
    #[error("Invalid taxon ID: {value:?}")]
    InvalidTaxId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid flag value.
    #[error("Invalid flag value: {value:?} (expected 0 or 1)")]
    InvalidFlag {
        /// The invalid flag value.
        value: String,
    },

    /// Invalid integer value.
    #[error("Invalid integer value: {value:?}")]
    InvalidInteger {
        /// The invalid value.
        value: String,
    },

    /// GI mapping requested for a database other than nucl or prot.
    #[error("Unsupported database type {value:?}: must be either nucl or prot")]
    UnsupportedDatabaseType {
        /// The requested database type.
        value: String,
    },
}

impl TaxdumpError {
    /// Returns true if the error concerns a single malformed row.
    ///
    /// Row errors reject that row only; any other error aborts the load.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFieldCount { .. }
                | Self::InvalidTaxId { .. }
                | Self::InvalidFlag { .. }
                | Self::InvalidInteger { .. }
        )
    }
}

/// Result type for taxonomy dump operations.
pub type TaxdumpResult<T> = Result<T, TaxdumpError>;

/// Configuration for name loading.
#[derive(Debug, Clone)]
pub struct NamesConfig {
    /// Name classes to keep (empty = all classes the store indexes).
    pub classes: Vec<NameClass>,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            classes: vec![NameClass::ScientificName, NameClass::BlastName],
        }
    }
}

impl NamesConfig {
    /// Keeps GenBank synonyms and synonyms as well.
    ///
    /// Slower and uses more memory than the default.
    pub fn extended() -> Self {
        Self {
            classes: vec![
                NameClass::ScientificName,
                NameClass::BlastName,
                NameClass::GenbankSynonym,
                NameClass::Synonym,
            ],
        }
    }

    /// Keeps scientific names only, which is all a lineage walk needs.
    pub fn scientific_only() -> Self {
        Self {
            classes: vec![NameClass::ScientificName],
        }
    }

    /// Returns true if names of this class should be kept.
    pub fn keeps(&self, class: NameClass) -> bool {
        class != NameClass::Other && (self.classes.is_empty() || self.classes.contains(&class))
    }
}

/// Configuration for building a taxonomy store.
#[derive(Debug, Clone)]
pub struct TaxdumpConfig {
    /// Directory holding `nodes.dmp`, `names.dmp` and `division.dmp`.
    pub directory: PathBuf,
    /// Name loading options.
    pub names: NamesConfig,
    /// Parse lines across rayon workers when the `parallel` feature is on.
    pub parallel: bool,
}

impl Default for TaxdumpConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_TAXONOMY_DIR),
            names: NamesConfig::default(),
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl TaxdumpConfig {
    /// Creates a config reading from `directory`.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Creates a config from `NCBI_TAXONOMY_DIR`, falling back to `taxonomy`.
    pub fn from_env() -> Self {
        match std::env::var_os(TAXONOMY_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    /// Switches to extended name loading.
    pub fn with_extended_names(mut self) -> Self {
        self.names = NamesConfig::extended();
        self
    }
}

/// Statistics from parsing a dump file.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Total records read from file.
    pub total_records: usize,
    /// Records stored.
    pub accepted_records: usize,
    /// Well-formed records not stored (name class not wanted).
    pub skipped_records: usize,
    /// Malformed records rejected.
    pub rejected_records: usize,
    /// Time taken to parse in milliseconds.
    pub parse_time_ms: u64,
}

impl ParseStats {
    /// Returns the percentage of records that were stored.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.accepted_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Discovered dump files in a taxonomy directory.
#[derive(Debug, Clone, Default)]
pub struct TaxdumpFiles {
    /// Directory that was searched.
    pub directory: PathBuf,
    /// Path to `nodes.dmp` (or `nodes.dmp.gz`).
    pub nodes_file: Option<PathBuf>,
    /// Path to `names.dmp` (or `names.dmp.gz`).
    pub names_file: Option<PathBuf>,
    /// Path to `division.dmp` (or `division.dmp.gz`).
    pub division_file: Option<PathBuf>,
    /// Path to `gi_taxid_nucl.dmp.gz`.
    pub gi_nucl_file: Option<PathBuf>,
    /// Path to `gi_taxid_prot.dmp.gz`.
    pub gi_prot_file: Option<PathBuf>,
}

impl TaxdumpFiles {
    /// Creates an empty file set for `directory`.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Returns true if nodes, names and divisions are all present.
    pub fn has_required_files(&self) -> bool {
        self.nodes_file.is_some() && self.names_file.is_some() && self.division_file.is_some()
    }

    /// Returns a list of missing required files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.nodes_file.is_none() {
            missing.push(NODES_FILE);
        }
        if self.names_file.is_none() {
            missing.push(NAMES_FILE);
        }
        if self.division_file.is_none() {
            missing.push(DIVISION_FILE);
        }
        missing
    }

    /// Returns the GI mapping file for a database, if present.
    pub fn gi_file(&self, db: GiDatabase) -> Option<&Path> {
        match db {
            GiDatabase::Nucleotide => self.gi_nucl_file.as_deref(),
            GiDatabase::Protein => self.gi_prot_file.as_deref(),
        }
    }
}
