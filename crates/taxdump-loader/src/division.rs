//! Division file parser.
//!
//! Parses `division.dmp` rows.

use taxdump_types::TaxonDivision;

use crate::parser::{parse, DmpRecord};
use crate::types::TaxdumpResult;

impl DmpRecord for TaxonDivision {
    const FIELD_COUNTS: &'static [usize] = &[4];

    fn from_fields(fields: &[&str]) -> TaxdumpResult<Self> {
        Ok(TaxonDivision {
            division_id: parse::integer(fields[0])?,
            code: fields[1].to_string(),
            name: fields[2].to_string(),
            comments: fields[3].to_string(),
        })
    }
}
