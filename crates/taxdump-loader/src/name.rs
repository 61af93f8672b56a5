//! Taxonomy name file parser.
//!
//! Parses `names.dmp` rows.

use taxdump_types::TaxonName;

use crate::parser::{parse, DmpRecord};
use crate::types::{NamesConfig, TaxdumpResult};

/// Columns in a name row.
pub const NAME_COLUMNS: usize = 4;

impl DmpRecord for TaxonName {
    const FIELD_COUNTS: &'static [usize] = &[NAME_COLUMNS];

    fn from_fields(fields: &[&str]) -> TaxdumpResult<Self> {
        Ok(TaxonName {
            tax_id: parse::tax_id(fields[0])?,
            name: fields[1].to_string(),
            unique_name: fields[2].to_string(),
            name_class: fields[3].to_string(),
        })
    }
}

/// Name-class filter for name records.
pub trait NameFilter {
    /// Returns true if the name passes the filter.
    fn passes_name_filter(&self, config: &NamesConfig) -> bool;
}

impl NameFilter for TaxonName {
    fn passes_name_filter(&self, config: &NamesConfig) -> bool {
        config.keeps(self.class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_fields, split_dmp_line};
    use taxdump_types::NameClass;

    #[test]
    fn test_parse_name_record() {
        let fields = split_dmp_line("8276\t|\tPantodon buchholzi\t|\t\t|\tscientific name\t|");

        let name: TaxonName = parse_fields(&fields, 1).unwrap();
        assert_eq!(name.tax_id, "8276");
        assert_eq!(name.name, "Pantodon buchholzi");
        assert_eq!(name.unique_name, "");
        assert_eq!(name.class(), NameClass::ScientificName);
    }

    #[test]
    fn test_names_keep_quotes() {
        let fields = split_dmp_line("12\t|\t\"Bacillus\" sp.\t|\t\t|\tsynonym\t|");
        let name: TaxonName = parse_fields(&fields, 1).unwrap();
        assert_eq!(name.name, "\"Bacillus\" sp.");
    }

    #[test]
    fn test_name_filter() {
        let scientific = TaxonName::new("562", "Escherichia coli", "", "scientific name");
        let synonym = TaxonName::new("562", "Bacterium coli", "", "synonym");
        let common = TaxonName::new("562", "E. coli", "", "common name");

        let default = NamesConfig::default();
        assert!(scientific.passes_name_filter(&default));
        assert!(!synonym.passes_name_filter(&default));
        assert!(!common.passes_name_filter(&default));

        let extended = NamesConfig::extended();
        assert!(synonym.passes_name_filter(&extended));
        assert!(!common.passes_name_filter(&extended));
    }
}
