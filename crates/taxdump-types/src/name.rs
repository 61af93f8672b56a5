//! Taxonomy name type.
//!
//! This module provides the `TaxonName` struct representing a row of
//! `names.dmp`.

use crate::{NameClass, TaxId};

/// A name attached to a taxon.
///
/// A taxon has exactly one scientific name and any number of synonyms,
/// common names, blast names and so on.
///
/// # Examples
///
/// ```
/// use taxdump_types::{NameClass, TaxonName};
///
/// let name = TaxonName::new("8276", "Pantodon buchholzi", "", "scientific name");
/// assert!(name.is_scientific());
/// assert_eq!(name.class(), NameClass::ScientificName);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxonName {
    /// The taxon this name belongs to.
    pub tax_id: TaxId,
    /// The name itself.
    pub name: String,
    /// Unique variant of the name when `name` is not unique; usually empty.
    pub unique_name: String,
    /// Raw name class ("scientific name", "synonym", ...).
    pub name_class: String,
}

impl TaxonName {
    /// Creates a name record.
    pub fn new(
        tax_id: impl Into<TaxId>,
        name: impl Into<String>,
        unique_name: impl Into<String>,
        name_class: impl Into<String>,
    ) -> Self {
        Self {
            tax_id: tax_id.into(),
            name: name.into(),
            unique_name: unique_name.into(),
            name_class: name_class.into(),
        }
    }

    /// Returns the classified name class.
    pub fn class(&self) -> NameClass {
        NameClass::classify(&self.name_class)
    }

    /// Returns true if this is the scientific name of the taxon.
    pub fn is_scientific(&self) -> bool {
        self.class() == NameClass::ScientificName
    }
}
