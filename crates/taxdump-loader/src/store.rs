//! In-memory taxonomy data store.
//!
//! Provides lookup of parsed taxdump data keyed by taxon ID.
//! Includes parallel parsing support via rayon for large dumps.
//!
//! ```ignore
//! let config = TaxdumpConfig::new("/data/taxonomy");
//! let store = TaxonomyStore::load(&config)?;
//!
//! let node = store.get_node("9606");
//! let name = store.get_scientific_name("9606");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use taxdump_types::{NameClass, TaxId, TaxonDivision, TaxonName, TaxonNode};

use crate::loader::discover_taxdump_files;
use crate::name::NameFilter;
use crate::parser::{DmpParser, DmpRecord};
use crate::types::{NamesConfig, ParseStats, TaxdumpConfig, TaxdumpFiles, TaxdumpResult};

/// In-memory store for the NCBI taxonomy.
///
/// Built once from the dump files, then only read.
///
/// # Example
///
/// ```ignore
/// use taxdump_loader::{TaxonomyStore, TaxdumpConfig};
///
/// let store = TaxonomyStore::load(&TaxdumpConfig::from_env())?;
///
/// if let Some(node) = store.get_node("562") {
///     println!("{} is a {}", node.tax_id, node.rank);
/// }
/// ```
#[derive(Default)]
pub struct TaxonomyStore {
    /// Nodes indexed by taxon ID.
    nodes: HashMap<TaxId, TaxonNode>,
    /// Scientific name per taxon.
    scientific_names: HashMap<TaxId, TaxonName>,
    /// Blast name per taxon.
    blast_names: HashMap<TaxId, TaxonName>,
    /// GenBank synonyms per taxon (extended names only).
    genbank_synonyms: HashMap<TaxId, Vec<TaxonName>>,
    /// Other synonyms per taxon (extended names only).
    synonyms: HashMap<TaxId, Vec<TaxonName>>,
    /// Divisions indexed by division ID.
    divisions: HashMap<u32, TaxonDivision>,
    /// Reverse parent index, built by `build_child_index()`.
    children: Option<HashMap<TaxId, Vec<TaxId>>>,
}

impl std::fmt::Debug for TaxonomyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyStore")
            .field("nodes", &self.nodes.len())
            .field("scientific_names", &self.scientific_names.len())
            .field("blast_names", &self.blast_names.len())
            .field("genbank_synonyms", &self.genbank_synonyms.len())
            .field("synonyms", &self.synonyms.len())
            .field("divisions", &self.divisions.len())
            .field("children", &self.children.is_some())
            .finish()
    }
}

impl TaxonomyStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with pre-allocated capacity for `node_count` taxa.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(node_count),
            scientific_names: HashMap::with_capacity(node_count),
            ..Default::default()
        }
    }

    /// Builds a store from the dump files in `config.directory`.
    ///
    /// # Errors
    /// Fails with `MissingReferenceFile` if nodes, names or divisions are
    /// absent, and with any I/O error hit while reading them. No partial
    /// store is returned.
    pub fn load(config: &TaxdumpConfig) -> TaxdumpResult<Self> {
        let files = discover_taxdump_files(&config.directory)?;
        let mut store = Self::new();
        store.load_all(&files, config)?;
        Ok(store)
    }

    /// Loads nodes, names and divisions from discovered files.
    pub fn load_all(&mut self, files: &TaxdumpFiles, config: &TaxdumpConfig) -> TaxdumpResult<()> {
        if let Some(path) = &files.nodes_file {
            self.load_nodes_with(path, config.parallel)?;
        }
        if let Some(path) = &files.names_file {
            self.load_names_with(path, &config.names, config.parallel)?;
        }
        if let Some(path) = &files.division_file {
            self.load_divisions(path)?;
        }

        tracing::info!(
            nodes = self.node_count(),
            names = self.scientific_names.len(),
            divisions = self.divisions.len(),
            "taxonomy loaded from {}",
            files.directory.display()
        );
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn load_nodes_with(&mut self, path: &Path, parallel: bool) -> TaxdumpResult<ParseStats> {
        if parallel {
            self.load_nodes_parallel(path)
        } else {
            self.load_nodes(path)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn load_nodes_with(&mut self, path: &Path, _parallel: bool) -> TaxdumpResult<ParseStats> {
        self.load_nodes(path)
    }

    #[cfg(feature = "parallel")]
    fn load_names_with(
        &mut self,
        path: &Path,
        config: &NamesConfig,
        parallel: bool,
    ) -> TaxdumpResult<ParseStats> {
        if parallel {
            self.load_names_parallel(path, config)
        } else {
            self.load_names(path, config)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn load_names_with(
        &mut self,
        path: &Path,
        config: &NamesConfig,
        _parallel: bool,
    ) -> TaxdumpResult<ParseStats> {
        self.load_names(path, config)
    }

    /// Loads nodes from a `nodes.dmp` file.
    pub fn load_nodes<P: AsRef<Path>>(&mut self, path: P) -> TaxdumpResult<ParseStats> {
        let path = path.as_ref();
        let start = Instant::now();
        let parser = DmpParser::<_, TaxonNode>::from_path(path)?;
        absorb(parser, path, start, |node| {
            self.insert_node(node);
            true
        })
    }

    /// Loads names from a `names.dmp` file, keeping the classes in `config`.
    pub fn load_names<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &NamesConfig,
    ) -> TaxdumpResult<ParseStats> {
        let path = path.as_ref();
        let start = Instant::now();
        let parser = DmpParser::<_, TaxonName>::from_path(path)?;
        absorb(parser, path, start, |name| {
            name.passes_name_filter(config) && self.insert_name(name)
        })
    }

    /// Loads divisions from a `division.dmp` file.
    pub fn load_divisions<P: AsRef<Path>>(&mut self, path: P) -> TaxdumpResult<ParseStats> {
        let path = path.as_ref();
        let start = Instant::now();
        let parser = DmpParser::<_, TaxonDivision>::from_path(path)?;
        absorb(parser, path, start, |division| {
            self.divisions.insert(division.division_id, division);
            true
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PARALLEL LOADING METHODS (requires "parallel" feature)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Loads nodes using parallel parsing.
    ///
    /// Reads all lines into memory, then parses them across rayon workers.
    #[cfg(feature = "parallel")]
    pub fn load_nodes_parallel<P: AsRef<Path>>(&mut self, path: P) -> TaxdumpResult<ParseStats> {
        let path = path.as_ref();
        let start = Instant::now();
        let parsed = parse_lines_parallel::<TaxonNode>(path)?;
        self.nodes.reserve(parsed.len());
        absorb(parsed, path, start, |node| {
            self.insert_node(node);
            true
        })
    }

    /// Loads names using parallel parsing.
    #[cfg(feature = "parallel")]
    pub fn load_names_parallel<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &NamesConfig,
    ) -> TaxdumpResult<ParseStats> {
        let path = path.as_ref();
        let start = Instant::now();
        let parsed = parse_lines_parallel::<TaxonName>(path)?;
        absorb(parsed, path, start, |name| {
            name.passes_name_filter(config) && self.insert_name(name)
        })
    }

    // Programmatic inserts

    /// Inserts nodes into the store, replacing any with the same ID.
    pub fn insert_nodes(&mut self, nodes: impl IntoIterator<Item = TaxonNode>) {
        for node in nodes {
            self.insert_node(node);
        }
    }

    /// Inserts names, routing each by its name class.
    pub fn insert_names(&mut self, names: impl IntoIterator<Item = TaxonName>) {
        for name in names {
            self.insert_name(name);
        }
    }

    /// Inserts divisions into the store.
    pub fn insert_divisions(&mut self, divisions: impl IntoIterator<Item = TaxonDivision>) {
        for division in divisions {
            self.divisions.insert(division.division_id, division);
        }
    }

    fn insert_node(&mut self, node: TaxonNode) {
        self.children = None;
        self.nodes.insert(node.tax_id.clone(), node);
    }

    /// Stores a name under its class. Returns false for classes the store
    /// does not index.
    fn insert_name(&mut self, name: TaxonName) -> bool {
        match name.class() {
            NameClass::ScientificName => {
                self.scientific_names.insert(name.tax_id.clone(), name);
            }
            NameClass::BlastName => {
                self.blast_names.insert(name.tax_id.clone(), name);
            }
            NameClass::GenbankSynonym => {
                self.genbank_synonyms
                    .entry(name.tax_id.clone())
                    .or_default()
                    .push(name);
            }
            NameClass::Synonym => {
                self.synonyms.entry(name.tax_id.clone()).or_default().push(name);
            }
            NameClass::Other => return false,
        }
        true
    }

    // Lookups

    /// Gets a node by taxon ID.
    pub fn get_node(&self, tax_id: &str) -> Option<&TaxonNode> {
        self.nodes.get(tax_id)
    }

    /// Checks if a node exists.
    pub fn has_node(&self, tax_id: &str) -> bool {
        self.nodes.contains_key(tax_id)
    }

    /// Gets the scientific name of a taxon.
    pub fn get_scientific_name(&self, tax_id: &str) -> Option<&TaxonName> {
        self.scientific_names.get(tax_id)
    }

    /// Gets the blast name of a taxon.
    pub fn get_blast_name(&self, tax_id: &str) -> Option<&TaxonName> {
        self.blast_names.get(tax_id)
    }

    /// Gets the GenBank synonyms of a taxon (empty unless extended names were loaded).
    pub fn get_genbank_synonyms(&self, tax_id: &str) -> &[TaxonName] {
        self.genbank_synonyms.get(tax_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Gets the other synonyms of a taxon (empty unless extended names were loaded).
    pub fn get_synonyms(&self, tax_id: &str) -> &[TaxonName] {
        self.synonyms.get(tax_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Gets a division by ID.
    pub fn get_division(&self, division_id: u32) -> Option<&TaxonDivision> {
        self.divisions.get(&division_id)
    }

    /// Gets the division a taxon belongs to.
    pub fn division_for(&self, tax_id: &str) -> Option<&TaxonDivision> {
        self.get_node(tax_id)
            .and_then(|node| self.get_division(node.division_id))
    }

    /// Gets the parent node of a taxon. The root has no parent.
    pub fn get_parent(&self, tax_id: &str) -> Option<&TaxonNode> {
        let node = self.get_node(tax_id)?;
        if !node.has_parent() {
            return None;
        }
        self.get_node(&node.parent_id)
    }

    /// Builds the reverse parent index used by `get_children()`.
    pub fn build_child_index(&mut self) {
        let mut children: HashMap<TaxId, Vec<TaxId>> = HashMap::new();
        for node in self.nodes.values().filter(|n| n.has_parent()) {
            children
                .entry(node.parent_id.clone())
                .or_default()
                .push(node.tax_id.clone());
        }
        for ids in children.values_mut() {
            ids.sort();
        }
        self.children = Some(children);
    }

    /// Returns true if the child index is built.
    pub fn has_child_index(&self) -> bool {
        self.children.is_some()
    }

    /// Gets the direct children of a taxon, sorted.
    ///
    /// Uses the child index when built, otherwise scans every node.
    pub fn get_children(&self, tax_id: &str) -> Vec<TaxId> {
        if let Some(children) = &self.children {
            return children.get(tax_id).cloned().unwrap_or_default();
        }

        let mut ids: Vec<TaxId> = self
            .nodes
            .values()
            .filter(|n| n.has_parent() && n.parent_id == tax_id)
            .map(|n| n.tax_id.clone())
            .collect();
        ids.sort();
        ids
    }

    // Statistics

    /// Returns the number of nodes in the store.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of names of any class in the store.
    pub fn name_count(&self) -> usize {
        self.scientific_names.len()
            + self.blast_names.len()
            + self.genbank_synonyms.values().map(Vec::len).sum::<usize>()
            + self.synonyms.values().map(Vec::len).sum::<usize>()
    }

    /// Returns the number of divisions in the store.
    pub fn division_count(&self) -> usize {
        self.divisions.len()
    }

    /// Returns an iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &TaxonNode> {
        self.nodes.values()
    }

    /// Returns an iterator over all taxon IDs.
    pub fn tax_ids(&self) -> impl Iterator<Item = &TaxId> {
        self.nodes.keys()
    }
}

/// Drains parse results into the store via `insert`, counting outcomes.
///
/// `insert` returns false for well-formed records it chose not to keep.
/// Malformed rows are logged and rejected; any other error aborts.
fn absorb<T, I, F>(
    records: I,
    path: &Path,
    start: Instant,
    mut insert: F,
) -> TaxdumpResult<ParseStats>
where
    I: IntoIterator<Item = TaxdumpResult<T>>,
    F: FnMut(T) -> bool,
{
    let mut stats = ParseStats::default();
    for record in records {
        stats.total_records += 1;
        match record {
            Ok(record) => {
                if insert(record) {
                    stats.accepted_records += 1;
                } else {
                    stats.skipped_records += 1;
                }
            }
            Err(e) if e.is_row_error() => {
                stats.rejected_records += 1;
                tracing::warn!(file = %path.display(), error = %e, "rejecting malformed row");
            }
            Err(e) => return Err(e),
        }
    }
    stats.parse_time_ms = start.elapsed().as_millis() as u64;

    tracing::debug!(
        file = %path.display(),
        total = stats.total_records,
        accepted = stats.accepted_records,
        skipped = stats.skipped_records,
        rejected = stats.rejected_records,
        elapsed_ms = stats.parse_time_ms,
        "parsed dump file"
    );
    Ok(stats)
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARALLEL PARSING HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Parses every line of a dump file across rayon workers, keeping file order.
#[cfg(feature = "parallel")]
fn parse_lines_parallel<T>(path: &Path) -> TaxdumpResult<Vec<TaxdumpResult<T>>>
where
    T: DmpRecord + Send,
{
    use crate::parser::{parse_fields, read_lines, split_dmp_line};

    let lines = read_lines(path)?;
    Ok(lines
        .par_iter()
        .map(|(line_no, line)| parse_fields::<T>(&split_dmp_line(line), *line_no))
        .collect())
}
