#[allow(non_snake_case)]
/// parser of the NASA Glenn thermo.inp database and the database views built on it
pub mod DBhandlers;
/// gas constants and the molar-mass unit
pub mod constants;
#[allow(non_snake_case)]
/// numeric evaluation of the 9-coefficient polynomials
pub mod NASA9_poly;
#[allow(non_snake_case)]
/// symbolic expressions and closures for Cp, H, S
pub mod NASA9_sym;
/// temperature-dependent state of one species
pub mod thermo_state;
/// species view with derived quantities and JSON export
pub mod chem_db;
/// tabulated properties
pub mod property_table;
