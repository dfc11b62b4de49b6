//! # ThermoInp
//! Reader for the NASA Glenn thermodynamic database `thermo.inp` (9-coefficient polynomial
//! form) with lookup, subsetting and evaluation of heat capacity, enthalpy and entropy.
//!
//! - `Thermodynamics::DBhandlers` parses the fixed-width records into species datasets and
//!   offers prefix lookup, regex search and database-syntax subsets
//! - `Thermodynamics::thermo_state` evaluates Cp, H, S (per mole and per kilogram) at a
//!   temperature
//! - `Thermodynamics::chem_db` and `Thermodynamics::property_table` build species views, JSON
//!   export and property tables on top of the parser
//! # Examples
//! ```
//! use ThermoInp::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
//! use ThermoInp::Thermodynamics::chem_db::ChemDB;
//! use ThermoInp::Thermodynamics::constants::PhysicalConstants;
//! use ThermoInp::Thermodynamics::property_table::PropertyTable;
//! let source = ThermoInpDB::parse(ThermoInp::SAMPLE_DATABASE).unwrap();
//! let mut db = ChemDB::load(&source, PhysicalConstants::default()).unwrap();
//! db.select(&["Air"]).unwrap();
//! let table = PropertyTable::new(&[200.0, 500.0, 2000.0], db.get("Air").unwrap()).unwrap();
//! println!("{}", table.formatted());
//! ```
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Thermodynamics;

/// Excerpt of thermo.inp in its native column layout: gaseous and condensed products and
/// reactants, including species known only by an assigned enthalpy
pub const SAMPLE_DATABASE: &str = include_str!("../data/thermo_sample.inp");
