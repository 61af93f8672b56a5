//! Well-known taxonomy identifiers and the pplacer rank schema.
//!
//! # Examples
//!
//! ```
//! use taxdump_types::well_known;
//!
//! assert_eq!(well_known::ROOT_TAX_ID, "1");
//! assert_eq!(well_known::PPLACER_RANKS.len(), 8);
//! assert!(well_known::is_domain_alias("superkingdom"));
//! ```

// =============================================================================
// Root
// =============================================================================

/// Taxon ID of the root of the NCBI tree. Its parent is itself.
pub const ROOT_TAX_ID: &str = "1";

/// Value written to the `root` column of every flattened lineage.
///
/// Any taxon that resolves at all hangs off the root, so the column is
/// always populated.
pub const ROOT_MARKER: &str = "1";

// =============================================================================
// Ranks
// =============================================================================

/// Canonical ranks of a pplacer taxonomy row, in column order.
pub const PPLACER_RANKS: [&str; 8] = [
    "root", "domain", "phylum", "class", "order", "family", "genus", "species",
];

/// Rank names that fill the `domain` column.
pub const DOMAIN_ALIASES: [&str; 3] = ["superkingdom", "acellular root", "domain"];

/// Rank used by NCBI for nodes that sit outside the Linnaean ranks.
pub const NO_RANK: &str = "no rank";

/// Returns the column index of a canonical rank, if `rank` is one.
pub fn rank_index(rank: &str) -> Option<usize> {
    PPLACER_RANKS.iter().position(|r| *r == rank)
}

/// Returns true if `rank` is written to the `domain` column.
pub fn is_domain_alias(rank: &str) -> bool {
    DOMAIN_ALIASES.contains(&rank)
}

// =============================================================================
// Dump files
// =============================================================================

/// Node table file name.
pub const NODES_FILE: &str = "nodes.dmp";

/// Name table file name.
pub const NAMES_FILE: &str = "names.dmp";

/// Division table file name.
pub const DIVISION_FILE: &str = "division.dmp";
