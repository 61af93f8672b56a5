//! Read access to a loaded taxonomy.
//!
//! The lineage flattener only needs two lookups. `TaxonomySource` names
//! them so it can run against `TaxonomyStore` or any other mapping.

use std::collections::HashMap;

use taxdump_types::{TaxId, TaxonName, TaxonNode};

use crate::TaxonomyStore;

/// Taxon lookups consumed by lineage walks.
pub trait TaxonomySource {
    /// Returns the node of `tax_id`, or `None` if it is not loaded.
    fn lookup_node(&self, tax_id: &str) -> Option<&TaxonNode>;

    /// Returns the scientific name of `tax_id`, or `None` if it has none.
    fn lookup_name(&self, tax_id: &str) -> Option<&TaxonName>;
}

impl TaxonomySource for TaxonomyStore {
    fn lookup_node(&self, tax_id: &str) -> Option<&TaxonNode> {
        self.get_node(tax_id)
    }

    fn lookup_name(&self, tax_id: &str) -> Option<&TaxonName> {
        self.get_scientific_name(tax_id)
    }
}

/// Plain node and name maps, as handed over by other loaders.
impl TaxonomySource for (HashMap<TaxId, TaxonNode>, HashMap<TaxId, TaxonName>) {
    fn lookup_node(&self, tax_id: &str) -> Option<&TaxonNode> {
        self.0.get(tax_id)
    }

    fn lookup_name(&self, tax_id: &str) -> Option<&TaxonName> {
        self.1.get(tax_id)
    }
}
