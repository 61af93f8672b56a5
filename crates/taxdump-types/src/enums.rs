//! Taxonomy enumeration types.
//!
//! This module provides enum representations for the coded text values that
//! appear in the dump, such as the name class of a `names.dmp` row and the
//! sequence database of a GI mapping file.

/// Category of a row in `names.dmp`.
///
/// # Examples
///
/// ```
/// use taxdump_types::NameClass;
///
/// assert_eq!(NameClass::classify("scientific name"), NameClass::ScientificName);
/// assert_eq!(NameClass::classify("genbank synonym"), NameClass::GenbankSynonym);
/// assert_eq!(NameClass::classify("authority"), NameClass::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameClass {
    /// The accepted name of the taxon.
    ScientificName,
    /// Common name used by BLAST to group results.
    BlastName,
    /// Synonym assigned by GenBank.
    GenbankSynonym,
    /// Any other synonym.
    Synonym,
    /// Authority, common name, includes, misspelling and so on.
    Other,
}

impl NameClass {
    /// Text of the scientific name class.
    pub const SCIENTIFIC_NAME: &'static str = "scientific name";
    /// Text of the blast name class.
    pub const BLAST_NAME: &'static str = "blast name";
    /// Text of the GenBank synonym class.
    pub const GENBANK_SYNONYM: &'static str = "genbank synonym";
    /// Text of the synonym class.
    pub const SYNONYM: &'static str = "synonym";

    /// Classifies the raw `name_class` column.
    ///
    /// Matching is by containment, checked from the most to the least
    /// specific class, so `"genbank synonym"` never lands in `Synonym`.
    pub fn classify(raw: &str) -> Self {
        if raw.contains(Self::SCIENTIFIC_NAME) {
            Self::ScientificName
        } else if raw.contains(Self::BLAST_NAME) {
            Self::BlastName
        } else if raw.contains(Self::GENBANK_SYNONYM) {
            Self::GenbankSynonym
        } else if raw.contains(Self::SYNONYM) {
            Self::Synonym
        } else {
            Self::Other
        }
    }
}

/// Sequence database of a GI-to-taxon mapping file.
///
/// # Examples
///
/// ```
/// use taxdump_types::GiDatabase;
///
/// assert_eq!(GiDatabase::from_code("prot"), Some(GiDatabase::Protein));
/// assert_eq!(GiDatabase::Nucleotide.file_name(), "gi_taxid_nucl.dmp.gz");
/// assert_eq!(GiDatabase::from_code("wgs"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GiDatabase {
    /// Nucleotide GIs (`gi_taxid_nucl.dmp.gz`).
    #[default]
    Nucleotide,
    /// Protein GIs (`gi_taxid_prot.dmp.gz`).
    Protein,
}

impl GiDatabase {
    /// Short code for nucleotide.
    pub const NUCLEOTIDE_CODE: &'static str = "nucl";
    /// Short code for protein.
    pub const PROTEIN_CODE: &'static str = "prot";

    /// Creates a GiDatabase from its short code.
    ///
    /// Returns `None` for anything other than `nucl` or `prot`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            Self::NUCLEOTIDE_CODE => Some(Self::Nucleotide),
            Self::PROTEIN_CODE => Some(Self::Protein),
            _ => None,
        }
    }

    /// Returns the short code for this database.
    pub fn code(self) -> &'static str {
        match self {
            Self::Nucleotide => Self::NUCLEOTIDE_CODE,
            Self::Protein => Self::PROTEIN_CODE,
        }
    }

    /// Returns the name of the compressed mapping file.
    pub fn file_name(self) -> String {
        format!("gi_taxid_{}.dmp.gz", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_class_classification() {
        assert_eq!(NameClass::classify("scientific name"), NameClass::ScientificName);
        assert_eq!(NameClass::classify("blast name"), NameClass::BlastName);
        assert_eq!(NameClass::classify("genbank synonym"), NameClass::GenbankSynonym);
        assert_eq!(NameClass::classify("synonym"), NameClass::Synonym);
        assert_eq!(NameClass::classify("common name"), NameClass::Other);
        assert_eq!(NameClass::classify(""), NameClass::Other);
    }

    #[test]
    fn test_name_class_containment() {
        // Trailing delimiter debris must not defeat classification
        assert_eq!(NameClass::classify("scientific name\t|"), NameClass::ScientificName);
    }

    #[test]
    fn test_gi_database_conversion() {
        assert_eq!(GiDatabase::from_code("nucl"), Some(GiDatabase::Nucleotide));
        assert_eq!(GiDatabase::from_code("prot"), Some(GiDatabase::Protein));
        assert_eq!(GiDatabase::from_code("NUCL"), None);
        assert_eq!(GiDatabase::Protein.code(), "prot");
        assert_eq!(GiDatabase::Protein.file_name(), "gi_taxid_prot.dmp.gz");
    }
}
