//! # taxdump-loader
//!
//! Parser and in-memory store for NCBI taxonomy dump files, plus the
//! lineage flattener that turns a taxon into a pplacer taxonomy row.
//!
//! ## Usage
//!
//! ```ignore
//! use taxdump_loader::{flatten, TaxdumpConfig, TaxonomyStore};
//!
//! let store = TaxonomyStore::load(&TaxdumpConfig::new("/data/taxonomy"))?;
//! let row = flatten(&store, "562")?;
//! println!("{}", row.fields().join(","));
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): parses dump lines and flattens batches across
//!   rayon workers.

#![warn(missing_docs)]

mod division;
pub mod gi;
pub mod lineage;
mod loader;
mod name;
mod node;
pub mod parser;
mod source;
mod store;
mod types;

pub use gi::{read_gi_taxid, read_gi_taxid_by_code, read_taxid_gi, read_taxid_gi_by_code};
pub use lineage::{
    flatten, flatten_all, lineage_ids, LineageError, LineageWalk, PplacerRecord, TaxonTable,
    TaxonomyDefect, PPLACER_HEADER,
};
pub use loader::{discover_taxdump_files, require_dump};
pub use name::NameFilter;
pub use node::{EXTENDED_NODE_COLUMNS, NODE_COLUMNS};
pub use parser::{DmpParser, DmpRecord};
pub use source::TaxonomySource;
pub use store::TaxonomyStore;
pub use types::{
    NamesConfig, ParseStats, TaxdumpConfig, TaxdumpError, TaxdumpFiles, TaxdumpResult,
    DEFAULT_TAXONOMY_DIR, TAXONOMY_DIR_ENV,
};

// Re-export taxdump-types for convenience
pub use taxdump_types;
