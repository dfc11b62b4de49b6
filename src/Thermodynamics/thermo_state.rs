//! # Thermodynamic state of one species
//!
//! [`ThermoState`] holds a temperature and the property snapshot computed at that temperature.
//! The snapshot is computed before anything is stored, so a rejected temperature leaves the
//! state exactly as it was and the cached values never disagree with `T`.
//!
//! Interval selection: the first interval whose `Tmax >= T` is active, so a temperature equal to
//! an interior boundary belongs to the lower interval. The overall span
//! `[Tmin of the first interval, Tmax of the last one]` is inclusive at both ends.
//! # Examples
//! ```
//! use ThermoInp::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
//! use ThermoInp::Thermodynamics::constants::PhysicalConstants;
//! use ThermoInp::Thermodynamics::thermo_state::ThermoState;
//! let db = ThermoInpDB::parse(ThermoInp::SAMPLE_DATABASE).unwrap();
//! let n2 = db.get("N2").unwrap();
//! let mut state = ThermoState::from_record(n2, &PhysicalConstants::default(), 298.15).unwrap();
//! state.set_temperature(1000.0).unwrap();
//! assert_eq!(state.active_index(), 0);
//! assert!(state.Cp() > 32.0);
//! ```
#![allow(non_snake_case)]
use crate::Thermodynamics::DBhandlers::NASA9_interval::{TemperatureInterval, check_contiguous};
use crate::Thermodynamics::DBhandlers::NASA9_species::{SpeciesRecord, ThermoModel};
use crate::Thermodynamics::DBhandlers::thermoinp_error::{ThermoInpError, ThermoInpResult};
use crate::Thermodynamics::NASA9_poly::{ThermoProperties, check_temperature};
use crate::Thermodynamics::constants::PhysicalConstants;
use std::sync::Arc;

/// reference temperature of the standard state, K
pub const STANDARD_TEMPERATURE: f64 = 298.15;

#[derive(Debug, Clone, PartialEq)]
pub struct ThermoState {
    species: String,
    intervals: Arc<[TemperatureInterval]>,
    /// molar gas constant of the fits, J/mol-K
    R_molar: f64,
    /// specific gas constant of the species, J/kg-K
    R_specific: f64,
    active: usize,
    properties: ThermoProperties,
}

impl ThermoState {
    /// State of species `species` at temperature T.
    /// Fails with `NoThermoModel` when `intervals` is empty and with `InvalidIntervals` when
    /// they are not ascending and contiguous.
    pub fn new(
        species: &str,
        intervals: Arc<[TemperatureInterval]>,
        rel_molar_mass: f64,
        constants: &PhysicalConstants,
        T: f64,
    ) -> ThermoInpResult<Self> {
        if intervals.is_empty() {
            return Err(ThermoInpError::NoThermoModel(species.to_string()));
        }
        check_contiguous(&intervals).map_err(|reason| ThermoInpError::InvalidIntervals {
            species: species.to_string(),
            reason,
        })?;
        let R_molar = constants.R_CEA;
        let R_specific = constants.specific_gas_constant(rel_molar_mass);
        let (active, properties) =
            compute(species, &intervals, R_molar, R_specific, T)?;
        Ok(Self {
            species: species.to_string(),
            intervals,
            R_molar,
            R_specific,
            active,
            properties,
        })
    }

    /// State at the standard temperature of 298.15 K
    pub fn standard(
        species: &str,
        intervals: Arc<[TemperatureInterval]>,
        rel_molar_mass: f64,
        constants: &PhysicalConstants,
    ) -> ThermoInpResult<Self> {
        Self::new(species, intervals, rel_molar_mass, constants, STANDARD_TEMPERATURE)
    }

    /// State of a parsed species; single-point species have no polynomial and are refused
    pub fn from_record(
        record: &SpeciesRecord,
        constants: &PhysicalConstants,
        T: f64,
    ) -> ThermoInpResult<Self> {
        match &record.model {
            ThermoModel::WithIntervals { intervals, .. } => Self::new(
                &record.name,
                Arc::from(intervals.as_slice()),
                record.molar_mass,
                constants,
                T,
            ),
            ThermoModel::SinglePoint { .. } => {
                Err(ThermoInpError::NoThermoModel(record.name.clone()))
            }
        }
    }

    /// Move the state to temperature T. On error nothing changes.
    pub fn set_temperature(&mut self, T: f64) -> ThermoInpResult<()> {
        let (active, properties) =
            compute(&self.species, &self.intervals, self.R_molar, self.R_specific, T)?;
        self.active = active;
        self.properties = properties;
        Ok(())
    }

    /// Properties at T without touching the state
    pub fn evaluate(&self, T: f64) -> ThermoInpResult<ThermoProperties> {
        compute(&self.species, &self.intervals, self.R_molar, self.R_specific, T)
            .map(|(_, properties)| properties)
    }

    pub fn species(&self) -> &str {
        &self.species
    }
    pub fn intervals(&self) -> &[TemperatureInterval] {
        &self.intervals
    }
    /// (Tmin, Tmax) of the whole polynomial model
    pub fn bounds(&self) -> (f64, f64) {
        span(&self.intervals)
    }
    pub fn active_index(&self) -> usize {
        self.active
    }
    pub fn active_interval(&self) -> &TemperatureInterval {
        &self.intervals[self.active]
    }
    pub fn properties(&self) -> ThermoProperties {
        self.properties
    }
    /// temperature, K
    pub fn T(&self) -> f64 {
        self.properties.T
    }
    /// molar heat capacity at constant pressure, J/mol-K
    pub fn Cp(&self) -> f64 {
        self.properties.Cp
    }
    /// molar enthalpy, J/mol
    pub fn H(&self) -> f64 {
        self.properties.H
    }
    /// molar entropy, J/mol-K
    pub fn S(&self) -> f64 {
        self.properties.S
    }
    /// specific heat capacity at constant pressure, J/kg-K
    pub fn cp(&self) -> f64 {
        self.properties.cp
    }
    /// specific enthalpy, J/kg
    pub fn h(&self) -> f64 {
        self.properties.h
    }
    /// specific entropy, J/kg-K
    pub fn s(&self) -> f64 {
        self.properties.s
    }
}

/// intervals must not be empty
fn span(intervals: &[TemperatureInterval]) -> (f64, f64) {
    match (intervals.first(), intervals.last()) {
        (Some(first), Some(last)) => (first.t_min(), last.t_max()),
        _ => (f64::NAN, f64::NAN),
    }
}

/// index of the interval for T, lower interval on shared boundaries
pub fn select_interval(intervals: &[TemperatureInterval], T: f64) -> ThermoInpResult<usize> {
    check_temperature(T)?;
    let (t_min, t_max) = span(intervals);
    if !(t_min <= T && T <= t_max) {
        return Err(ThermoInpError::OutOfRange {
            temperature: T,
            t_min,
            t_max,
        });
    }
    intervals
        .iter()
        .position(|interval| T <= interval.t_max())
        .ok_or(ThermoInpError::OutOfRange {
            temperature: T,
            t_min,
            t_max,
        })
}

fn compute(
    species: &str,
    intervals: &[TemperatureInterval],
    R_molar: f64,
    R_specific: f64,
    T: f64,
) -> ThermoInpResult<(usize, ThermoProperties)> {
    let active = select_interval(intervals, T).map_err(|e| {
        log::debug!("{}: {}", species, e);
        e
    })?;
    let properties = ThermoProperties::evaluate(&intervals[active], T, R_molar, R_specific)?;
    Ok((active, properties))
}
