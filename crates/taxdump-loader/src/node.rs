//! Taxonomy node file parser.
//!
//! Parses `nodes.dmp` rows in the classic 13-column layout and the extended
//! 18-column layout.

use taxdump_types::{NodeExtension, TaxonNode};

use crate::parser::{parse, DmpRecord};
use crate::types::TaxdumpResult;

/// Columns in the classic node layout.
pub const NODE_COLUMNS: usize = 13;

/// Columns in the extended node layout.
pub const EXTENDED_NODE_COLUMNS: usize = 18;

impl DmpRecord for TaxonNode {
    const FIELD_COUNTS: &'static [usize] = &[NODE_COLUMNS, EXTENDED_NODE_COLUMNS];

    fn from_fields(fields: &[&str]) -> TaxdumpResult<Self> {
        let extension = if fields.len() == EXTENDED_NODE_COLUMNS {
            Some(NodeExtension {
                plastid_genetic_code_id: parse::integer(fields[13])?,
                inherited_plastid_genetic_code: parse::flag(fields[14])?,
                specified_species: parse::flag(fields[15])?,
                hydrogenosome_genetic_code_id: parse::integer(fields[16])?,
                inherited_hydrogenosome_genetic_code: parse::flag(fields[17])?,
            })
        } else {
            None
        };

        Ok(TaxonNode {
            tax_id: parse::tax_id(fields[0])?,
            parent_id: parse::tax_id(fields[1])?,
            rank: fields[2].to_string(),
            embl_code: fields[3].to_string(),
            division_id: parse::integer(fields[4])?,
            inherited_division: parse::flag(fields[5])?,
            genetic_code_id: parse::integer(fields[6])?,
            inherited_genetic_code: parse::flag(fields[7])?,
            mito_genetic_code_id: parse::integer(fields[8])?,
            inherited_mito_genetic_code: parse::flag(fields[9])?,
            genbank_hidden: parse::flag(fields[10])?,
            hidden_subtree_root: parse::flag(fields[11])?,
            comments: fields[12].to_string(),
            extension,
        })
    }
}
