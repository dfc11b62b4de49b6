/// error type and result alias of the crate
pub mod thermoinp_error;

/// fixed-width field decoders and the Fortran double notation
pub mod fixed_width;

/// category blocks and per-species line groups of thermo.inp
pub mod thermoinp_tokenizer;
/// temperature interval records (9-coefficient polynomial form)
pub mod NASA9_interval;
/// species datasets: metadata record and thermodynamic model
pub mod NASA9_species;
/// reference-date codes
pub mod refcode;
/// parsed database with lookup, search and subsetting
pub mod thermoinp_db;
