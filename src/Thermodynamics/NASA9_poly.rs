//! # 9-coefficient polynomial evaluation
//!
//! Standard-state (P = 100 kPa) thermodynamic functions of one temperature interval:
//!
//! ```text
//! Cp/R = a1 T^-2 + a2 T^-1 + a3 + a4 T + a5 T^2 + a6 T^3 + a7 T^4
//! H/RT = -a1 T^-2 + a2 ln(T)/T + a3 + a4 T/2 + a5 T^2/3 + a6 T^3/4 + a7 T^4/5 + b1/T
//! S/R  = -a1 T^-2/2 - a2 T^-1 + a3 ln(T) + a4 T + a5 T^2/2 + a6 T^3/3 + a7 T^4/4 + b2
//! ```
//! The dimensionless values are scaled with the molar gas constant of the fits for molar
//! properties and with the specific gas constant of the species for mass-specific ones.
#![allow(non_snake_case)]
use crate::Thermodynamics::DBhandlers::NASA9_interval::{NUMBER_OF_COEFFICIENTS, TemperatureInterval};
use crate::Thermodynamics::DBhandlers::thermoinp_error::{ThermoInpError, ThermoInpResult};
use serde::Serialize;

pub type Coeffs = [f64; NUMBER_OF_COEFFICIENTS];

/// T must be finite and strictly positive
pub fn check_temperature(T: f64) -> ThermoInpResult<()> {
    if T.is_finite() && T > 0.0 {
        Ok(())
    } else {
        Err(ThermoInpError::Domain(T))
    }
}

/// Cp/R
pub fn dimensionless_heat_capacity(T: f64, a: &Coeffs) -> ThermoInpResult<f64> {
    check_temperature(T)?;
    Ok(a[0] / T.powi(2)
        + a[1] / T
        + a[2]
        + a[3] * T
        + a[4] * T.powi(2)
        + a[5] * T.powi(3)
        + a[6] * T.powi(4))
}

/// H/RT
pub fn dimensionless_enthalpy(T: f64, a: &Coeffs, b1: f64) -> ThermoInpResult<f64> {
    check_temperature(T)?;
    Ok(-a[0] / T.powi(2)
        + (a[1] * T.ln() + b1) / T
        + a[2]
        + a[3] * T / 2.0
        + a[4] * T.powi(2) / 3.0
        + a[5] * T.powi(3) / 4.0
        + a[6] * T.powi(4) / 5.0)
}

/// S/R
pub fn dimensionless_entropy(T: f64, a: &Coeffs, b2: f64) -> ThermoInpResult<f64> {
    check_temperature(T)?;
    Ok(-a[0] / (2.0 * T.powi(2)) - a[1] / T
        + (a[2] * T.ln() + b2)
        + a[3] * T
        + a[4] * T.powi(2) / 2.0
        + a[5] * T.powi(3) / 3.0
        + a[6] * T.powi(4) / 4.0)
}

/// Snapshot of the standard-state functions at one temperature.
/// Upper case: per mole, lower case: per kilogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermoProperties {
    /// K
    pub T: f64,
    /// J/mol-K
    pub Cp: f64,
    /// J/mol
    pub H: f64,
    /// J/mol-K
    pub S: f64,
    /// J/kg-K
    pub cp: f64,
    /// J/kg
    pub h: f64,
    /// J/kg-K
    pub s: f64,
}

impl ThermoProperties {
    /// Evaluate `interval` at T, `R_molar` in J/mol-K, `R_specific` in J/kg-K.
    /// The interval bounds are not checked here.
    pub fn evaluate(
        interval: &TemperatureInterval,
        T: f64,
        R_molar: f64,
        R_specific: f64,
    ) -> ThermoInpResult<Self> {
        let a = &interval.coefficients;
        let (b1, b2) = interval.integration_constants;
        let cp_nodim = dimensionless_heat_capacity(T, a)?;
        let h_nodim = dimensionless_enthalpy(T, a, b1)?;
        let s_nodim = dimensionless_entropy(T, a, b2)?;
        Ok(Self {
            T,
            Cp: cp_nodim * R_molar,
            H: h_nodim * R_molar * T,
            S: s_nodim * R_molar,
            cp: cp_nodim * R_specific,
            h: h_nodim * R_specific * T,
            s: s_nodim * R_specific,
        })
    }
}
