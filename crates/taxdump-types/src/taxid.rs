//! NCBI taxonomy identifier type.

/// An NCBI taxonomy identifier.
///
/// Taxon IDs are numeric in the dump, but they are kept as the exact text
/// found in the file so that lookups and output round-trip byte for byte.
///
/// # Examples
///
/// ```
/// use taxdump_types::TaxId;
///
/// let human: TaxId = "9606".to_string();
/// assert_eq!(human, "9606");
/// ```
pub type TaxId = String;
