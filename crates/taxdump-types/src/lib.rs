//! # taxdump-types
//!
//! Type definitions for the NCBI taxonomy dump.
//!
//! This crate provides Rust type definitions for the records of the NCBI
//! `taxdump` distribution: nodes, names and divisions, plus the constants
//! used when flattening a lineage into pplacer's fixed rank columns.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use taxdump_types::{NameClass, TaxId, TaxonName, TaxonNode};
//! use taxdump_types::well_known;
//!
//! let node = TaxonNode::new("562", "561", "species");
//! let name = TaxonName::new("562", "Escherichia coli", "", "scientific name");
//!
//! assert_eq!(name.class(), NameClass::ScientificName);
//! assert_eq!(well_known::rank_index(&node.rank), Some(7));
//!
//! let root: TaxId = well_known::ROOT_TAX_ID.to_string();
//! assert_eq!(root, "1");
//! ```

#![warn(missing_docs)]

mod division;
mod enums;
mod name;
mod node;
mod taxid;
pub mod well_known;

// Re-export all public types at crate root
pub use division::TaxonDivision;
pub use enums::{GiDatabase, NameClass};
pub use name::TaxonName;
pub use node::{NodeExtension, TaxonNode};
pub use taxid::TaxId;
