//! # thermo.inp database
//!
//! [`ThermoInpDB`] is the owned result of an explicit load: every species dataset is kept with
//! its category, its parsed [`SpeciesRecord`] and the source text it was parsed from. Lookup,
//! regex search and filtering produce either record references or new databases; subsets in
//! database syntax are assembled from the source text so they can be fed back to any
//! thermo.inp reader.
//! # Examples
//! ```
//! use ThermoInp::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
//! use ThermoInp::Thermodynamics::DBhandlers::thermoinp_tokenizer::Category;
//! let db = ThermoInpDB::parse(ThermoInp::SAMPLE_DATABASE).unwrap();
//! let n2 = db.lookup("N2", false);
//! assert!(n2.iter().any(|s| s.name == "N2H4(L)"));
//! let text = db.create_subset(&["JP"], None, false).unwrap();
//! assert!(text.contains("JP-10(g)"));
//! assert!(db.category(Category::Reactants).iter().any(|s| s.name == "Air"));
//! ```
use super::NASA9_species::SpeciesRecord;
use super::thermoinp_error::{ThermoInpError, ThermoInpResult};
use super::thermoinp_tokenizer::{Category, read_species};
use log::{debug, error, info, warn};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// interval line of the database header
pub const HEADER_INTERVALS: &str = "   200.000  1000.000  6000.000 20000.000   9/09/04";
pub const END_PRODUCTS: &str = "END PRODUCTS";
pub const END_REACTANTS: &str = "END REACTANTS";

/// One species dataset of the database
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub category: Category,
    pub record: SpeciesRecord,
    /// records of the dataset as found in the source, joined with newlines
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermoInpDB {
    entries: Vec<DatasetEntry>,
}

impl ThermoInpDB {
    /// Parse database text. Any malformed dataset fails the whole load.
    pub fn parse(text: &str) -> ThermoInpResult<Self> {
        let mut entries = Vec::new();
        for (category, groups) in read_species(text)? {
            for group in groups {
                let record = SpeciesRecord::from_records(&group.lines).map_err(|e| {
                    error!("{} dataset {:?} rejected: {}", category, group.name(), e);
                    e
                })?;
                debug!("parsed {} ({}, {} intervals)", record.name, category, record.nintervals());
                entries.push(DatasetEntry {
                    category,
                    record,
                    raw: group.raw(),
                });
            }
        }
        let db = Self { entries };
        info!(
            "thermo.inp loaded: {} species ({} gas products, {} condensed products, {} reactants)",
            db.len(),
            db.category(Category::GasProducts).len(),
            db.category(Category::CondensedProducts).len(),
            db.category(Category::Reactants).len()
        );
        Ok(db)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ThermoInpResult<Self> {
        let path = path.as_ref();
        info!("loading thermo.inp database from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            error!("failed to read {}: {}", path.display(), e);
            e
        })?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }
    /// (category, record) pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &SpeciesRecord)> {
        self.entries.iter().map(|e| (e.category, &e.record))
    }

    /// Records of one category in source order
    pub fn category(&self, category: Category) -> Vec<&SpeciesRecord> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| &e.record)
            .collect()
    }

    /// Category-keyed records; every category is present, possibly empty
    pub fn categorised(&self) -> HashMap<Category, Vec<&SpeciesRecord>> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.category(category)))
            .collect()
    }

    /// First dataset with exactly this name
    pub fn get(&self, name: &str) -> ThermoInpResult<&SpeciesRecord> {
        self.entries
            .iter()
            .find(|e| e.record.name == name)
            .map(|e| &e.record)
            .ok_or_else(|| ThermoInpError::Lookup(name.to_string()))
    }

    fn matching_entries<'a>(
        &'a self,
        prefix: &str,
        exact: bool,
    ) -> impl Iterator<Item = &'a DatasetEntry> {
        self.entries
            .iter()
            .filter(move |e| name_matches(&e.record.name, prefix, exact))
    }

    /// Species whose name starts with `prefix` (or equals it when `exact`). The prefix is
    /// literal text, not a pattern.
    pub fn lookup(&self, prefix: &str, exact: bool) -> Vec<&SpeciesRecord> {
        let found: Vec<&SpeciesRecord> = self
            .matching_entries(prefix, exact)
            .map(|e| &e.record)
            .collect();
        if found.is_empty() {
            warn!("no species matching {:?} (exact = {})", prefix, exact);
        }
        found
    }

    /// Species whose name matches the regular expression at its start, e.g. `.*H2` or `^H2$`
    pub fn search(&self, pattern: &str) -> ThermoInpResult<Vec<&SpeciesRecord>> {
        let regex = anchored(pattern)?;
        let found: Vec<&SpeciesRecord> = self
            .entries
            .iter()
            .filter(|e| regex.is_match(&e.record.name))
            .map(|e| &e.record)
            .collect();
        if found.is_empty() {
            warn!("no species matching pattern {:?}", pattern);
        }
        Ok(found)
    }

    /// New database with the species matched by any of the patterns
    pub fn subset(&self, patterns: &[&str]) -> ThermoInpResult<ThermoInpDB> {
        let regexes = patterns
            .iter()
            .map(|p| anchored(p))
            .collect::<ThermoInpResult<Vec<Regex>>>()?;
        Ok(self.filter(|_, record| regexes.iter().any(|r| r.is_match(&record.name))))
    }

    /// New database with the species satisfying the predicate
    pub fn filter<F>(&self, predicate: F) -> ThermoInpDB
    where
        F: Fn(Category, &SpeciesRecord) -> bool,
    {
        ThermoInpDB {
            entries: self
                .entries
                .iter()
                .filter(|e| predicate(e.category, &e.record))
                .cloned()
                .collect(),
        }
    }

    /// Category-keyed species names
    pub fn list_species(&self) -> BTreeMap<Category, Vec<String>> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let names = self
                    .category(category)
                    .into_iter()
                    .map(|r| r.name.clone())
                    .collect();
                (category, names)
            })
            .collect()
    }

    /// Syntactically valid database text holding the datasets selected by name prefix
    /// (`search_strings`), by category, or by both.
    ///
    /// With search strings the datasets are de-duplicated and sorted within each category;
    /// with a category alone the whole category is copied in source order. Blocks without
    /// datasets are left out.
    pub fn create_subset(
        &self,
        search_strings: &[&str],
        filter_category: Option<Category>,
        exact: bool,
    ) -> ThermoInpResult<String> {
        let mut blocks: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        match (search_strings.is_empty(), filter_category) {
            (true, None) => return Err(ThermoInpError::NoSubsetCriteria),
            (true, Some(category)) => {
                let datasets = self
                    .entries
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.raw.clone())
                    .collect();
                blocks.insert(category, datasets);
            }
            (false, _) => {
                for prefix in search_strings {
                    for entry in self.matching_entries(prefix, exact) {
                        if filter_category.is_some_and(|c| c != entry.category) {
                            continue;
                        }
                        let datasets = blocks.entry(entry.category).or_default();
                        if !datasets.contains(&entry.raw) {
                            datasets.push(entry.raw.clone());
                        }
                    }
                }
                for datasets in blocks.values_mut() {
                    datasets.sort();
                }
            }
        }
        let total: usize = blocks.values().map(Vec::len).sum();
        if total == 0 {
            warn!("subset {:?} ({:?}) is empty", search_strings, filter_category);
        }
        Ok(assemble(&blocks))
    }

    /// The whole database in thermo.inp syntax, re-serialised from the parsed records
    pub fn to_records(&self) -> String {
        let mut blocks: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            blocks
                .entry(entry.category)
                .or_default()
                .push(entry.record.to_records().join("\n"));
        }
        assemble(&blocks)
    }
}

fn name_matches(name: &str, prefix: &str, exact: bool) -> bool {
    if exact {
        name == prefix
    } else {
        name.starts_with(prefix)
    }
}

fn anchored(pattern: &str) -> ThermoInpResult<Regex> {
    Ok(Regex::new(&format!("^(?:{})", pattern))?)
}

/// header, gas products, condensed products, END PRODUCTS, reactants, END REACTANTS
fn assemble(blocks: &BTreeMap<Category, Vec<String>>) -> String {
    let block = |category: Category| {
        blocks
            .get(&category)
            .filter(|datasets| !datasets.is_empty())
            .map(|datasets| datasets.join("\n"))
    };
    let sections = [
        Some(format!("{:<80}\n{}", "thermo", HEADER_INTERVALS)),
        block(Category::GasProducts),
        block(Category::CondensedProducts),
        Some(format!("{:<80}", END_PRODUCTS)),
        block(Category::Reactants),
        Some(format!("{:<80}", END_REACTANTS)),
    ];
    sections.into_iter().flatten().collect::<Vec<_>>().join("\n")
}

/// Parse database text into category-keyed species records
pub fn parse(text: &str) -> ThermoInpResult<HashMap<Category, Vec<SpeciesRecord>>> {
    let db = ThermoInpDB::parse(text)?;
    Ok(db
        .categorised()
        .into_iter()
        .map(|(category, records)| (category, records.into_iter().cloned().collect()))
        .collect())
}

/// Records whose name starts with (or, if `exact`, equals) `prefix`
pub fn lookup<'a>(records: &'a [SpeciesRecord], prefix: &str, exact: bool) -> Vec<&'a SpeciesRecord> {
    records
        .iter()
        .filter(|r| name_matches(&r.name, prefix, exact))
        .collect()
}
