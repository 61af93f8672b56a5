//! Taxonomy node type.
//!
//! This module provides the `TaxonNode` struct representing a row of
//! `nodes.dmp`.

use crate::well_known::ROOT_TAX_ID;
use crate::TaxId;

/// A node of the NCBI taxonomy tree.
///
/// Represents a row from `nodes.dmp`. Only `tax_id`, `parent_id` and `rank`
/// take part in lineage walks; the remaining columns are carried so a loaded
/// store reflects the full dump.
///
/// # Examples
///
/// ```
/// use taxdump_types::TaxonNode;
///
/// let node = TaxonNode::new("9606", "9605", "species");
/// assert_eq!(node.parent_id, "9605");
/// assert!(!node.is_root());
/// assert!(TaxonNode::new("1", "1", "no rank").is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxonNode {
    /// Node ID in the GenBank taxonomy database.
    pub tax_id: TaxId,
    /// Parent node ID.
    pub parent_id: TaxId,
    /// Rank of this node ("species", "genus", "no rank", ...).
    pub rank: String,
    /// Locus-name prefix; often empty.
    pub embl_code: String,
    /// Division this node belongs to (see `division.dmp`).
    pub division_id: u32,
    /// Whether the division is inherited from the parent.
    pub inherited_division: bool,
    /// Genetic code ID.
    pub genetic_code_id: u32,
    /// Whether the genetic code is inherited from the parent.
    pub inherited_genetic_code: bool,
    /// Mitochondrial genetic code ID.
    pub mito_genetic_code_id: u32,
    /// Whether the mitochondrial genetic code is inherited from the parent.
    pub inherited_mito_genetic_code: bool,
    /// Whether the name is suppressed in GenBank entry lineages.
    pub genbank_hidden: bool,
    /// Whether this subtree has no sequence data yet.
    pub hidden_subtree_root: bool,
    /// Free-text comments and citations.
    pub comments: String,
    /// Columns present only in the extended node layout.
    pub extension: Option<NodeExtension>,
}

/// Trailing columns of the extended `nodes.dmp` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeExtension {
    /// Plastid genetic code ID.
    pub plastid_genetic_code_id: u32,
    /// Whether the plastid genetic code is inherited from the parent.
    pub inherited_plastid_genetic_code: bool,
    /// Whether the species in this node's lineage has a formal name.
    pub specified_species: bool,
    /// Hydrogenosome genetic code ID.
    pub hydrogenosome_genetic_code_id: u32,
    /// Whether the hydrogenosome genetic code is inherited from the parent.
    pub inherited_hydrogenosome_genetic_code: bool,
}

impl TaxonNode {
    /// Creates a node with the given identity and rank.
    ///
    /// All other columns take the values NCBI uses for an unannotated node
    /// (division 0, standard genetic code 1).
    pub fn new(
        tax_id: impl Into<TaxId>,
        parent_id: impl Into<TaxId>,
        rank: impl Into<String>,
    ) -> Self {
        Self {
            tax_id: tax_id.into(),
            parent_id: parent_id.into(),
            rank: rank.into(),
            embl_code: String::new(),
            division_id: 0,
            inherited_division: false,
            genetic_code_id: 1,
            inherited_genetic_code: false,
            mito_genetic_code_id: 0,
            inherited_mito_genetic_code: false,
            genbank_hidden: false,
            hidden_subtree_root: false,
            comments: String::new(),
            extension: None,
        }
    }

    /// Returns true if this is the root of the tree.
    pub fn is_root(&self) -> bool {
        self.tax_id == ROOT_TAX_ID
    }

    /// Returns true if this node has a parent distinct from itself.
    pub fn has_parent(&self) -> bool {
        !self.parent_id.is_empty() && self.parent_id != self.tax_id
    }
}
