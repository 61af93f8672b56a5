//! Taxonomy division type.

/// A GenBank division from `division.dmp`.
///
/// # Examples
///
/// ```
/// use taxdump_types::TaxonDivision;
///
/// let div = TaxonDivision {
///     division_id: 0,
///     code: "BCT".to_string(),
///     name: "Bacteria".to_string(),
///     comments: String::new(),
/// };
/// assert_eq!(div.code, "BCT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxonDivision {
    /// Division ID, referenced by `TaxonNode::division_id`.
    pub division_id: u32,
    /// Three-letter GenBank division code.
    pub code: String,
    /// Division name.
    pub name: String,
    /// Free-text comments.
    pub comments: String,
}
