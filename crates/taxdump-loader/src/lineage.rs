//! Lineage walks and pplacer row flattening.
//!
//! A pplacer taxonomy row names, for one taxon, the ancestor sitting at each
//! of eight canonical ranks:
//!
//! ```text
//! tax_id,parent_id,rank,tax_name,root,domain,phylum,class,order,family,genus,species
//! ```
//!
//! [`flatten`] walks parent pointers from the taxon itself up to the root
//! sentinel, dropping each node into its rank column. Ranks outside the
//! schema are passed over; the domain aliases (`superkingdom`,
//! `acellular root`) fill the `domain` column. Columns no ancestor fills stay
//! empty, so every row has the same twelve columns.

use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use taxdump_types::well_known::{is_domain_alias, rank_index, ROOT_MARKER, ROOT_TAX_ID};
use taxdump_types::{TaxId, TaxonNode};
use thiserror::Error;

use crate::source::TaxonomySource;

/// Column names of a pplacer taxonomy row.
pub const PPLACER_HEADER: [&str; 12] = [
    "tax_id", "parent_id", "rank", "tax_name", "root", "domain", "phylum", "class", "order",
    "family", "genus", "species",
];

const ROOT_SLOT: usize = 0;
const DOMAIN_SLOT: usize = 1;

/// Table a taxon was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonTable {
    /// The node table.
    Nodes,
    /// The scientific name table.
    Names,
}

impl fmt::Display for TaxonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nodes => f.write_str("nodes"),
            Self::Names => f.write_str("names"),
        }
    }
}

/// Integrity fault found while walking parent pointers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyDefect {
    /// The walk came back to a node it had already visited.
    #[error("parent pointers loop back to {at}")]
    Cycle {
        /// First node seen twice.
        at: TaxId,
    },

    /// A node names a parent that is not loaded.
    #[error("{child} points to missing parent {parent}")]
    BrokenParent {
        /// Node holding the dangling pointer.
        child: TaxId,
        /// Parent ID that has no node.
        parent: TaxId,
    },
}

/// Errors that can occur while resolving a single taxon.
///
/// Both variants concern one taxon only; batch callers report and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineageError {
    /// The taxon is absent from the node or name table.
    #[error("TaxID {tax_id} not found in taxonomy {table}")]
    TaxonNotFound {
        /// The queried taxon.
        tax_id: TaxId,
        /// Table the taxon is missing from.
        table: TaxonTable,
    },

    /// The lineage of the taxon does not reach the root.
    #[error("malformed taxonomy above {tax_id}: {defect}")]
    MalformedTaxonomy {
        /// The queried taxon.
        tax_id: TaxId,
        /// What is wrong with its lineage.
        defect: TaxonomyDefect,
    },
}

impl LineageError {
    /// Returns the taxon the error is about.
    pub fn tax_id(&self) -> &str {
        match self {
            Self::TaxonNotFound { tax_id, .. } | Self::MalformedTaxonomy { tax_id, .. } => tax_id,
        }
    }
}

/// One flattened row in pplacer taxonomy format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PplacerRecord {
    /// The queried taxon.
    pub tax_id: TaxId,
    /// Its immediate parent.
    pub parent_id: TaxId,
    /// Its own rank.
    pub rank: String,
    /// Its scientific name.
    pub tax_name: String,
    /// Ancestor ID per canonical rank, in `PPLACER_RANKS` order; empty when
    /// the lineage has no node at that rank.
    pub ranks: [String; 8],
}

impl PplacerRecord {
    /// Returns the ancestor filling `rank`, or `None` if `rank` is not a
    /// canonical rank. An unfilled canonical rank is `Some("")`.
    pub fn rank_slot(&self, rank: &str) -> Option<&str> {
        rank_index(rank).map(|i| self.ranks[i].as_str())
    }

    /// Returns the twelve columns of the row in `PPLACER_HEADER` order.
    pub fn fields(&self) -> [&str; 12] {
        let [root, domain, phylum, class, order, family, genus, species] = &self.ranks;
        [
            &self.tax_id,
            &self.parent_id,
            &self.rank,
            &self.tax_name,
            root,
            domain,
            phylum,
            class,
            order,
            family,
            genus,
            species,
        ]
    }
}

/// Iterator over a taxon and its ancestors, stopping below the root sentinel.
///
/// Yields the starting node first. A missing parent or a revisited node ends
/// the walk with a `MalformedTaxonomy` error; a missing starting node ends it
/// with `TaxonNotFound`.
pub struct LineageWalk<'a, S: TaxonomySource + ?Sized> {
    source: &'a S,
    origin: TaxId,
    next: Option<TaxId>,
    previous: Option<TaxId>,
    visited: HashSet<TaxId>,
}

impl<'a, S: TaxonomySource + ?Sized> LineageWalk<'a, S> {
    /// Starts a walk at `tax_id`.
    pub fn new(source: &'a S, tax_id: &str) -> Self {
        Self {
            source,
            origin: tax_id.to_string(),
            next: Some(tax_id.to_string()),
            previous: None,
            visited: HashSet::new(),
        }
    }

    fn malformed(&mut self, defect: TaxonomyDefect) -> LineageError {
        self.next = None;
        LineageError::MalformedTaxonomy {
            tax_id: self.origin.clone(),
            defect,
        }
    }
}

impl<'a, S: TaxonomySource + ?Sized> Iterator for LineageWalk<'a, S> {
    type Item = Result<&'a TaxonNode, LineageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current.is_empty() || current == ROOT_TAX_ID {
            return None;
        }

        if !self.visited.insert(current.clone()) {
            return Some(Err(self.malformed(TaxonomyDefect::Cycle { at: current })));
        }

        let source = self.source;
        let Some(node) = source.lookup_node(&current) else {
            return Some(Err(match self.previous.take() {
                Some(child) => self.malformed(TaxonomyDefect::BrokenParent {
                    child,
                    parent: current,
                }),
                None => LineageError::TaxonNotFound {
                    tax_id: current,
                    table: TaxonTable::Nodes,
                },
            }));
        };

        self.next = Some(node.parent_id.clone());
        self.previous = Some(current);
        Some(Ok(node))
    }
}

/// Returns the IDs of a taxon and its ancestors, leaf first, root excluded.
pub fn lineage_ids<S: TaxonomySource + ?Sized>(
    source: &S,
    tax_id: &str,
) -> Result<Vec<TaxId>, LineageError> {
    LineageWalk::new(source, tax_id)
        .map(|step| step.map(|node| node.tax_id.clone()))
        .collect()
}

/// Flattens the lineage of `tax_id` into a pplacer row.
///
/// # Errors
/// `TaxonNotFound` if the taxon has no node or no scientific name;
/// `MalformedTaxonomy` if its lineage hits a dangling parent or a cycle.
pub fn flatten<S: TaxonomySource + ?Sized>(
    source: &S,
    tax_id: &str,
) -> Result<PplacerRecord, LineageError> {
    let not_found = |table| LineageError::TaxonNotFound {
        tax_id: tax_id.to_string(),
        table,
    };
    let node = source.lookup_node(tax_id).ok_or_else(|| not_found(TaxonTable::Nodes))?;
    let name = source.lookup_name(tax_id).ok_or_else(|| not_found(TaxonTable::Names))?;

    let mut ranks: [String; 8] = Default::default();
    ranks[ROOT_SLOT] = ROOT_MARKER.to_string();

    for step in LineageWalk::new(source, tax_id) {
        let ancestor = step?;
        if let Some(slot) = rank_index(&ancestor.rank) {
            ranks[slot] = ancestor.tax_id.clone();
        }
        if is_domain_alias(&ancestor.rank) {
            ranks[DOMAIN_SLOT] = ancestor.tax_id.clone();
        }
    }

    Ok(PplacerRecord {
        tax_id: node.tax_id.clone(),
        parent_id: node.parent_id.clone(),
        rank: node.rank.clone(),
        tax_name: name.name.clone(),
        ranks,
    })
}

/// Flattens every ID in `tax_ids`, one result per ID in input order.
///
/// A failing ID does not affect the others.
#[cfg(feature = "parallel")]
pub fn flatten_all<S, T>(source: &S, tax_ids: &[T]) -> Vec<Result<PplacerRecord, LineageError>>
where
    S: TaxonomySource + Sync + ?Sized,
    T: AsRef<str> + Sync,
{
    tax_ids
        .par_iter()
        .map(|tax_id| flatten(source, tax_id.as_ref()))
        .collect()
}

/// Flattens every ID in `tax_ids`, one result per ID in input order.
///
/// A failing ID does not affect the others.
#[cfg(not(feature = "parallel"))]
pub fn flatten_all<S, T>(source: &S, tax_ids: &[T]) -> Vec<Result<PplacerRecord, LineageError>>
where
    S: TaxonomySource + Sync + ?Sized,
    T: AsRef<str> + Sync,
{
    tax_ids
        .iter()
        .map(|tax_id| flatten(source, tax_id.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use taxdump_types::well_known::PPLACER_RANKS;
    use taxdump_types::TaxonName;

    use crate::TaxonomyStore;

    fn make_store(nodes: &[(&str, &str, &str)], names: &[(&str, &str)]) -> TaxonomyStore {
        let mut store = TaxonomyStore::new();
        store.insert_nodes(
            nodes
                .iter()
                .map(|(id, parent, rank)| TaxonNode::new(*id, *parent, *rank)),
        );
        store.insert_names(
            names
                .iter()
                .map(|(id, name)| TaxonName::new(*id, *name, "", "scientific name")),
        );
        store
    }

    fn example_store() -> TaxonomyStore {
        make_store(
            &[
                ("10", "9", "species"),
                ("9", "8", "genus"),
                ("8", "1", "domain"),
                ("1", "1", "root"),
            ],
            &[("10", "Testus exampleus"), ("1", "root")],
        )
    }

    /// A slice of the real tree: E. coli K-12 up through Bacteria.
    fn ecoli_store() -> TaxonomyStore {
        make_store(
            &[
                ("1", "1", "no rank"),
                ("131567", "1", "no rank"),
                ("2", "131567", "superkingdom"),
                ("1224", "2", "phylum"),
                ("1236", "1224", "class"),
                ("91347", "1236", "order"),
                ("543", "91347", "family"),
                ("561", "543", "genus"),
                ("562", "561", "species"),
                ("83333", "562", "strain"),
            ],
            &[
                ("562", "Escherichia coli"),
                ("83333", "Escherichia coli K-12"),
                ("2", "Bacteria"),
            ],
        )
    }

    #[test]
    fn test_end_to_end_example() {
        let record = flatten(&example_store(), "10").unwrap();
        assert_eq!(
            record.fields(),
            ["10", "9", "species", "Testus exampleus", "1", "8", "", "", "", "", "9", "10"]
        );
    }

    #[test]
    fn test_full_lineage() {
        let record = flatten(&ecoli_store(), "562").unwrap();
        assert_eq!(record.parent_id, "561");
        assert_eq!(record.tax_name, "Escherichia coli");
        assert_eq!(
            record.ranks,
            ["1", "2", "1224", "1236", "91347", "543", "561", "562"].map(String::from)
        );
    }

    #[test]
    fn test_non_canonical_rank_is_passed_over() {
        let record = flatten(&ecoli_store(), "83333").unwrap();
        assert_eq!(record.rank, "strain");
        assert_eq!(record.rank_slot("species"), Some("562"));
        assert_eq!(record.rank_slot("genus"), Some("561"));
        assert_eq!(record.rank_slot("strain"), None);
    }

    #[test]
    fn test_superkingdom_fills_domain() {
        let record = flatten(&ecoli_store(), "2").unwrap();
        assert_eq!(record.rank_slot("domain"), Some("2"));
        assert_eq!(record.rank_slot("superkingdom"), None);
        assert_eq!(record.fields().len(), PPLACER_HEADER.len());
    }

    #[test]
    fn test_acellular_root_fills_domain() {
        let store = make_store(
            &[
                ("1", "1", "no rank"),
                ("10239", "1", "acellular root"),
                ("2731341", "10239", "realm"),
                ("10663", "2731341", "genus"),
            ],
            &[("10663", "Tequatrovirus")],
        );

        let record = flatten(&store, "10663").unwrap();
        assert_eq!(record.rank_slot("domain"), Some("10239"));
        assert_eq!(record.rank_slot("phylum"), Some(""));
        assert_eq!(record.rank_slot("genus"), Some("10663"));
    }

    #[test]
    fn test_root_sentinel() {
        let record = flatten(&example_store(), "1").unwrap();
        assert_eq!(record.ranks[0], ROOT_MARKER);
        assert!(record.ranks[1..].iter().all(String::is_empty));
    }

    #[test]
    fn test_always_eight_rank_columns() {
        let store = ecoli_store();
        for tax_id in ["2", "562", "83333"] {
            let record = flatten(&store, tax_id).unwrap();
            assert_eq!(record.tax_id, tax_id);
            assert_eq!(record.ranks.len(), PPLACER_RANKS.len());
        }
    }

    #[test]
    fn test_every_named_taxon_flattens() {
        let mut store = ecoli_store();
        let ids: Vec<TaxId> = store.tax_ids().cloned().collect();
        store.insert_names(ids.iter().map(|id| {
            TaxonName::new(id.as_str(), format!("taxon {id}"), "", "scientific name")
        }));

        for tax_id in &ids {
            let record = flatten(&store, tax_id).unwrap();
            let lineage = lineage_ids(&store, tax_id).unwrap();
            assert_eq!(&record.tax_id, tax_id);
            assert_eq!(record.ranks.len(), PPLACER_RANKS.len());
            assert_eq!(record.ranks[0], ROOT_MARKER);
            for slot in record.ranks[1..].iter().filter(|slot| !slot.is_empty()) {
                assert!(lineage.contains(slot), "{slot} not in lineage of {tax_id}");
            }
        }
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let store = ecoli_store();
        assert_eq!(flatten(&store, "83333"), flatten(&store, "83333"));
    }

    #[test]
    fn test_missing_taxon() {
        let err = flatten(&example_store(), "404").unwrap_err();
        assert_eq!(
            err,
            LineageError::TaxonNotFound {
                tax_id: "404".to_string(),
                table: TaxonTable::Nodes,
            }
        );
        assert_eq!(err.to_string(), "TaxID 404 not found in taxonomy nodes");
    }

    #[test]
    fn test_missing_name() {
        let err = flatten(&example_store(), "9").unwrap_err();
        assert!(matches!(
            err,
            LineageError::TaxonNotFound { table: TaxonTable::Names, .. }
        ));
    }

    #[test]
    fn test_cycle_is_malformed() {
        let store = make_store(
            &[("5", "6", "genus"), ("6", "7", "family"), ("7", "5", "order")],
            &[("5", "Loopus")],
        );

        let err = flatten(&store, "5").unwrap_err();
        assert_eq!(
            err,
            LineageError::MalformedTaxonomy {
                tax_id: "5".to_string(),
                defect: TaxonomyDefect::Cycle { at: "5".to_string() },
            }
        );
    }

    #[test]
    fn test_self_parent_below_root_is_malformed() {
        let store = make_store(&[("42", "42", "genus")], &[("42", "Selfus")]);
        assert!(matches!(
            flatten(&store, "42"),
            Err(LineageError::MalformedTaxonomy {
                defect: TaxonomyDefect::Cycle { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_broken_parent_is_malformed() {
        let store = make_store(
            &[("10", "9", "species"), ("9", "77", "genus")],
            &[("10", "Testus exampleus")],
        );

        let err = flatten(&store, "10").unwrap_err();
        assert_eq!(err.tax_id(), "10");
        assert_eq!(
            err,
            LineageError::MalformedTaxonomy {
                tax_id: "10".to_string(),
                defect: TaxonomyDefect::BrokenParent {
                    child: "9".to_string(),
                    parent: "77".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_empty_parent_ends_walk() {
        let store = make_store(&[("3", "", "phylum")], &[("3", "Orphanota")]);
        let record = flatten(&store, "3").unwrap();
        assert_eq!(record.rank_slot("phylum"), Some("3"));
        assert_eq!(record.parent_id, "");
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let store = ecoli_store();
        let ids = ["562", "404", "83333", "561"];

        let results = flatten_all(&store, &ids);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().tax_id, "562");
        assert_eq!(results[1].as_ref().unwrap_err().tax_id(), "404");
        assert_eq!(results[2].as_ref().unwrap().tax_id, "83333");
        // 561 has a node but no scientific name
        assert!(matches!(
            results[3],
            Err(LineageError::TaxonNotFound { table: TaxonTable::Names, .. })
        ));
    }

    #[test]
    fn test_lineage_ids() {
        let store = ecoli_store();
        assert_eq!(
            lineage_ids(&store, "562").unwrap(),
            vec!["562", "561", "543", "91347", "1236", "1224", "2", "131567"]
        );
        assert!(lineage_ids(&store, "1").unwrap().is_empty());
        assert!(lineage_ids(&store, "404").is_err());
    }

    #[test]
    fn test_walk_over_plain_maps() {
        let mut nodes = HashMap::new();
        let mut names = HashMap::new();
        let rows = [("10", "9", "species"), ("9", "8", "genus"), ("8", "1", "domain")];
        for (id, parent, rank) in rows {
            nodes.insert(id.to_string(), TaxonNode::new(id, parent, rank));
        }
        names.insert(
            "10".to_string(),
            TaxonName::new("10", "Testus exampleus", "", "scientific name"),
        );
        let source = (nodes, names);

        let record = flatten(&source, "10").unwrap();
        assert_eq!(record.rank_slot("domain"), Some("8"));
        assert_eq!(record.rank_slot("genus"), Some("9"));
    }
}
