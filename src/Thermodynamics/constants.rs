//! Physical constants used to scale the dimensionless polynomial values.
//!
//! The 9-coefficient fits were produced with the gas constant of Gordon & McBride
//! (`R_CEA = 8.314510 J/mol-K`), which differs from the CODATA value in the fifth decimal.
//! Molar properties must be scaled with `R_CEA` to reproduce the published tables. The constants
//! may be overridden from a JSON document with the same field names:
//! ```
//! use ThermoInp::Thermodynamics::constants::PhysicalConstants;
//! let c = PhysicalConstants::from_json_str(r#"{"M": 1.0e-3}"#).unwrap();
//! assert_eq!(c.R_CEA, 8.314510);
//! ```
use crate::Thermodynamics::DBhandlers::thermoinp_error::{ThermoInpError, ThermoInpResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// molar gas constant, J/mol-K (CODATA 2010)
pub const R: f64 = 8.3144621;
/// molar gas constant of the NASA Glenn fits, J/mol-K
pub const R_CEA: f64 = 8.314510;
/// molar mass unit, kg/mol
pub const M: f64 = 1.0e-3;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    pub R: f64,
    pub R_CEA: f64,
    pub M: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self { R, R_CEA, M }
    }
}

impl PhysicalConstants {
    /// every constant must be positive and finite
    pub fn validate(&self) -> ThermoInpResult<()> {
        for (name, value) in [("R", self.R), ("R_CEA", self.R_CEA), ("M", self.M)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ThermoInpError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }

    /// Missing fields take their default values
    pub fn from_json_str(json: &str) -> ThermoInpResult<Self> {
        let constants: PhysicalConstants = serde_json::from_str(json)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ThermoInpResult<Self> {
        let path = path.as_ref();
        let constants = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("physical constants loaded from {}: {:?}", path.display(), constants);
        Ok(constants)
    }

    /// molar mass, kg/mol, of a species of relative molar mass `rel_molar_mass`
    pub fn molar_mass(&self, rel_molar_mass: f64) -> f64 {
        self.M * rel_molar_mass
    }

    /// specific gas constant, J/kg-K
    pub fn specific_gas_constant(&self, rel_molar_mass: f64) -> f64 {
        self.R_CEA / self.molar_mass(rel_molar_mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = PhysicalConstants::default();
        assert_eq!(c.R, 8.3144621);
        assert_eq!(c.R_CEA, 8.314510);
        assert_eq!(c.M, 1.0e-3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_specific_gas_constant() {
        let c = PhysicalConstants::default();
        assert_relative_eq!(c.molar_mass(44.09562), 0.04409562, epsilon = 1e-15);
        assert_relative_eq!(c.specific_gas_constant(2.0), 4157.255, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_json() {
        let c = PhysicalConstants::from_json_str(r#"{"R_CEA": 8.314}"#).unwrap();
        assert_eq!(c.R_CEA, 8.314);
        assert_eq!(c.R, R);
    }

    #[test]
    fn test_invalid_values() {
        let err = PhysicalConstants::from_json_str(r#"{"M": 0.0}"#).unwrap_err();
        assert!(matches!(err, ThermoInpError::InvalidConstant { name: "M", .. }));
        let err = PhysicalConstants::from_json_str(r#"{"R": -1.0}"#).unwrap_err();
        assert!(matches!(err, ThermoInpError::InvalidConstant { name: "R", .. }));
        assert!(matches!(
            PhysicalConstants::from_json_str("{"),
            Err(ThermoInpError::Serde(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"R": 8.314462618, "R_CEA": 8.31451, "M": 0.001}}"#).unwrap();
        let c = PhysicalConstants::from_file(file.path()).unwrap();
        assert_eq!(c.R, 8.314462618);
    }
}
