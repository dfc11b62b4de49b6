//! Splitting of the database text into category blocks and per-species line groups.
//!
//! The database is broadly split into three categories of chemical species: gaseous
//! equilibrium products, condensed equilibrium products and reactants (e.g. `Air` or other
//! mixtures with characteristic properties). The section anchors are fixed by the format:
//! gaseous products begin with species `e-`, condensed products with `Ag(cr)`, reactants with
//! `Air`; products end at the `END PRODUCTS` sentinel and reactants at `END REACTANTS`.
use super::thermoinp_error::{ThermoInpError, ThermoInpResult};
use log::{debug, error};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of species in the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    GasProducts,
    CondensedProducts,
    Reactants,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::GasProducts,
        Category::CondensedProducts,
        Category::Reactants,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GasProducts => "gas_products",
            Category::CondensedProducts => "condensed_products",
            Category::Reactants => "reactants",
        }
    }
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw text of the three category blocks, sentinels excluded
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBlocks {
    pub gas_products: String,
    pub condensed_products: String,
    pub reactants: String,
}

impl CategoryBlocks {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::GasProducts => &self.gas_products,
            Category::CondensedProducts => &self.condensed_products,
            Category::Reactants => &self.reactants,
        }
    }
}

/// Records of one species (header, metadata and tail records)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpeciesLines {
    pub lines: Vec<String>,
}

impl SpeciesLines {
    /// the dataset as it appears in the source
    pub fn raw(&self) -> String {
        self.lines.join("\n")
    }
    /// name region of the first record
    pub fn name(&self) -> &str {
        self.lines
            .first()
            .map(|head| {
                let end = head.len().min(18);
                head.get(..end).unwrap_or(head).trim_end()
            })
            .unwrap_or("")
    }
}

fn normalise_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Split the database into category blocks.
pub fn read_categories(text: &str) -> ThermoInpResult<CategoryBlocks> {
    let contents = normalise_line_endings(text);
    // the three categories are caught in one go
    let pattern = Regex::new(
        r"(?s)(?:\A|\n)(e-.*)\n(Ag\(cr\).*)\nEND PRODUCTS[^\n]*\n(Air.*)\nEND REACTANTS",
    )?;
    let captures = pattern.captures(&contents).ok_or_else(|| {
        let msg = "section anchors 'e-', 'Ag(cr)', 'END PRODUCTS', 'Air', 'END REACTANTS' not found"
            .to_string();
        error!("{}", msg);
        ThermoInpError::Format(msg)
    })?;
    let group = |i: usize| {
        captures
            .get(i)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ThermoInpError::Format(format!("category block {} is missing", i)))
    };
    Ok(CategoryBlocks {
        gas_products: group(1)?,
        condensed_products: group(2)?,
        reactants: group(3)?,
    })
}

/// true for the first record of a species: a letter or `(` in the first column.
/// Interval and continuation records begin with a blank, a digit or a sign.
fn starts_species(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '(')
}

/// Split one category block into per-species line groups.
pub fn split_species(block: &str) -> ThermoInpResult<Vec<SpeciesLines>> {
    let mut groups: Vec<SpeciesLines> = Vec::new();
    for line in block.lines() {
        if starts_species(line) {
            groups.push(SpeciesLines {
                lines: vec![line.to_string()],
            });
        } else if let Some(current) = groups.last_mut() {
            current.lines.push(line.to_string());
        } else if !line.trim().is_empty() {
            return Err(ThermoInpError::Format(format!(
                "data record before the first species record: {:?}",
                line
            )));
        }
    }
    // blank records carry no data
    for group in groups.iter_mut() {
        while group.lines.last().is_some_and(|l| l.trim().is_empty()) {
            group.lines.pop();
        }
    }
    Ok(groups)
}

/// Split the database into categorised lists of species line groups.
pub fn read_species(text: &str) -> ThermoInpResult<Vec<(Category, Vec<SpeciesLines>)>> {
    let blocks = read_categories(text)?;
    Category::ALL
        .into_iter()
        .map(|category| {
            let groups = split_species(blocks.get(category))?;
            debug!("{}: {} species datasets", category, groups.len());
            Ok((category, groups))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "thermo\n   200.000  1000.000\ne-                first\n 3 g12/98\nAg(cr)            second\n 1 coda89\nEND PRODUCTS\nAir               third\n 2 g 9/95\nEND REACTANTS\n";

    #[test]
    fn test_read_categories() {
        let blocks = read_categories(MINIMAL).unwrap();
        assert_eq!(blocks.gas_products, "e-                first\n 3 g12/98");
        assert_eq!(blocks.condensed_products, "Ag(cr)            second\n 1 coda89");
        assert_eq!(blocks.reactants, "Air               third\n 2 g 9/95");
    }

    #[test]
    fn test_read_categories_crlf() {
        let text = MINIMAL.replace('\n', "\r\n");
        let blocks = read_categories(&text).unwrap();
        assert_eq!(blocks.reactants, "Air               third\n 2 g 9/95");
    }

    #[test]
    fn test_missing_sentinel_is_format_error() {
        let truncated = MINIMAL.replace("END REACTANTS", "");
        assert!(matches!(
            read_categories(&truncated),
            Err(ThermoInpError::Format(_))
        ));
        assert!(matches!(read_categories(""), Err(ThermoInpError::Format(_))));
    }

    #[test]
    fn test_split_species() {
        let block = "H2                Ref-Elm.\n 3 tpis78 H   2.00\n    200.000   1000.0007\n-1.0D+00\n(HCOOH)2          dimer\n 2 g 6/01\nN2                Ref\n 3 tpis78\n";
        let groups = split_species(block).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].lines.len(), 4);
        assert_eq!(groups[0].name(), "H2");
        assert_eq!(groups[1].name(), "(HCOOH)2");
        assert_eq!(groups[2].lines, vec!["N2                Ref", " 3 tpis78"]);
    }

    #[test]
    fn test_data_before_species_is_rejected() {
        assert!(split_species(" 3 tpis78\nH2   x\n").is_err());
    }

    #[test]
    fn test_read_species_order() {
        let categorised = read_species(MINIMAL).unwrap();
        let categories: Vec<Category> = categorised.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert_eq!(categorised[2].1[0].name(), "Air");
    }
}
