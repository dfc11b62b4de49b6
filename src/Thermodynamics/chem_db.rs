//! # Chemical database view
//!
//! [`ChemDB`] maps species names to [`ChemSpecies`], the species data needed for property
//! evaluation: molar mass, specific gas constant, formation enthalpy and the shared temperature
//! intervals. Species are copied from the source database into the view with `select`, and the
//! view can be exported as JSON.
//! # Examples
//! ```
//! use ThermoInp::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
//! use ThermoInp::Thermodynamics::chem_db::ChemDB;
//! use ThermoInp::Thermodynamics::constants::PhysicalConstants;
//! let source = ThermoInpDB::parse(ThermoInp::SAMPLE_DATABASE).unwrap();
//! let mut db = ChemDB::load(&source, PhysicalConstants::default()).unwrap();
//! db.select(&["Air"]).unwrap();
//! let air = db.get("Air").unwrap();
//! let state = air.thermo_state(500.0).unwrap();
//! assert!((state.Cp() - 29.82).abs() < 0.01);
//! assert!(db.select(&["Adamantium"]).is_err());
//! ```
#![allow(non_snake_case)]
use crate::Thermodynamics::DBhandlers::NASA9_interval::{TemperatureInterval, check_contiguous};
use crate::Thermodynamics::DBhandlers::NASA9_species::{SpeciesRecord, ThermoModel};
use crate::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
use crate::Thermodynamics::DBhandlers::thermoinp_error::{ThermoInpError, ThermoInpResult};
use crate::Thermodynamics::constants::PhysicalConstants;
use crate::Thermodynamics::thermo_state::ThermoState;
use log::{debug, info, warn};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Chemical species: a substance of known composition in a defined phase
#[derive(Debug, Clone, PartialEq)]
pub struct ChemSpecies {
    pub name: String,
    /// relative molar mass, kg/kmol
    pub Mr: f64,
    /// heat of formation, J/mol
    pub Hf: Option<f64>,
    /// molar mass, kg/mol
    pub M: f64,
    /// specific gas constant, J/kg-K
    pub R: f64,
    /// specific heat of formation, J/kg
    pub hf: Option<f64>,
    /// polynomial model, shared with every state created from this species
    pub intervals: Option<Arc<[TemperatureInterval]>>,
    pub constants: PhysicalConstants,
}

impl ChemSpecies {
    pub fn new(
        name: &str,
        rel_molar_mass: f64,
        formation_enthalpy: Option<f64>,
        intervals: Option<Vec<TemperatureInterval>>,
        constants: PhysicalConstants,
    ) -> ThermoInpResult<Self> {
        if !(rel_molar_mass.is_finite() && rel_molar_mass > 0.0) {
            return Err(ThermoInpError::InvalidConstant {
                name: "relative molar mass",
                value: rel_molar_mass,
            });
        }
        let M = constants.molar_mass(rel_molar_mass);
        let R = constants.R_CEA / M;
        let hf = formation_enthalpy.map(|Hf| Hf / M);
        let intervals = intervals.filter(|intervals| !intervals.is_empty());
        if let Some(intervals) = &intervals {
            check_contiguous(intervals).map_err(|reason| ThermoInpError::InvalidIntervals {
                species: name.to_string(),
                reason,
            })?;
        }
        let intervals = intervals.map(Arc::from);
        Ok(Self {
            name: name.to_string(),
            Mr: rel_molar_mass,
            Hf: formation_enthalpy,
            M,
            R,
            hf,
            intervals,
            constants,
        })
    }

    pub fn from_record(record: &SpeciesRecord, constants: PhysicalConstants) -> ThermoInpResult<Self> {
        let intervals = match &record.model {
            ThermoModel::WithIntervals { intervals, .. } => Some(intervals.clone()),
            ThermoModel::SinglePoint { .. } => None,
        };
        Self::new(
            &record.name,
            record.molar_mass,
            record.heat_of_formation(),
            intervals,
            constants,
        )
    }

    pub fn has_thermo(&self) -> bool {
        self.intervals.is_some()
    }

    /// (Tmin, Tmax) of the polynomial model
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let intervals = self.intervals.as_ref()?;
        Some((intervals.first()?.t_min(), intervals.last()?.t_max()))
    }

    /// Thermodynamic state at T; fails for species without temperature intervals
    pub fn thermo_state(&self, T: f64) -> ThermoInpResult<ThermoState> {
        let intervals = self
            .intervals
            .clone()
            .ok_or_else(|| ThermoInpError::NoThermoModel(self.name.clone()))?;
        ThermoState::new(&self.name, intervals, self.Mr, &self.constants, T)
    }

    pub fn to_json(&self) -> Value {
        let thermo = match (&self.intervals, self.bounds()) {
            (Some(intervals), Some((t_min, t_max))) => {
                let intervals: Vec<Value> = intervals
                    .iter()
                    .map(|interval| {
                        json!({
                            "Tmin": interval.t_min(),
                            "Tmax": interval.t_max(),
                            "coefficients": interval.coefficients.to_vec(),
                            "integ_constants": [
                                interval.integration_constants.0,
                                interval.integration_constants.1
                            ],
                        })
                    })
                    .collect();
                json!({ "Tmin": t_min, "Tmax": t_max, "intervals": intervals })
            }
            _ => Value::Null,
        };
        json!({
            "name": self.name,
            "molar_mass": { "units": "kg/mol", "value": self.M },
            "gas_constant": { "units": "J/kg-K", "value": self.R },
            "formation_enthalpy": { "units": "J/mol", "value": self.Hf },
            "thermo": thermo,
        })
    }
}

/// Species view over a source database
#[derive(Debug, Clone, Default)]
pub struct ChemDB {
    source: HashMap<String, ChemSpecies>,
    view: BTreeMap<String, ChemSpecies>,
}

impl ChemDB {
    /// Flat name-keyed source map; of datasets sharing a name the last one wins
    pub fn load(db: &ThermoInpDB, constants: PhysicalConstants) -> ThermoInpResult<Self> {
        constants.validate()?;
        let mut source = HashMap::with_capacity(db.len());
        for (_, record) in db.iter() {
            let species = ChemSpecies::from_record(record, constants)?;
            if source.insert(record.name.clone(), species).is_some() {
                debug!("duplicate species name {} replaced", record.name);
            }
        }
        info!("chemical database source: {} species", source.len());
        Ok(Self {
            source,
            view: BTreeMap::new(),
        })
    }

    /// Add species to the view. Nothing is added if any name is unknown.
    pub fn select(&mut self, names: &[&str]) -> ThermoInpResult<()> {
        if let Some(missing) = names.iter().find(|name| !self.source.contains_key(**name)) {
            warn!("{} is not in the source database", missing);
            return Err(ThermoInpError::Lookup(missing.to_string()));
        }
        for name in names {
            if let Some(species) = self.source.get(*name) {
                self.view.insert(name.to_string(), species.clone());
            }
        }
        Ok(())
    }

    pub fn select_all(&mut self) {
        self.view.extend(
            self.source
                .iter()
                .map(|(name, species)| (name.clone(), species.clone())),
        );
    }

    pub fn get(&self, name: &str) -> ThermoInpResult<&ChemSpecies> {
        self.view
            .get(name)
            .ok_or_else(|| ThermoInpError::Lookup(name.to_string()))
    }

    /// names in the view, sorted
    pub fn names(&self) -> Vec<&str> {
        self.view.keys().map(String::as_str).collect()
    }
    pub fn len(&self) -> usize {
        self.view.len()
    }
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn to_json(&self) -> Value {
        let species: Vec<Value> = self.view.values().map(ChemSpecies::to_json).collect();
        json!({ "chemdb": species })
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> ThermoInpResult<()> {
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writeln!(writer)?;
        Ok(())
    }

    /// Write the view as JSON to a new file; an existing file is never overwritten
    pub fn write<P: AsRef<Path>>(&self, path: P) -> ThermoInpResult<()> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ThermoInpError::FileExists(path.display().to_string()));
        }
        self.write_to(File::create_new(path)?)?;
        info!("{} species written to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_DATABASE;
    use approx::assert_relative_eq;

    fn chem_db() -> ChemDB {
        let source = ThermoInpDB::parse(SAMPLE_DATABASE).unwrap();
        ChemDB::load(&source, PhysicalConstants::default()).unwrap()
    }

    #[test]
    fn test_propane_derived_values() {
        let propane = ChemSpecies::new(
            "Propane",
            44.09562,
            Some(-104680.0),
            None,
            PhysicalConstants::default(),
        )
        .unwrap();
        assert_relative_eq!(propane.M, 0.04409562, epsilon = 1e-12);
        assert_relative_eq!(propane.R, 188.6, epsilon = 0.1);
        assert_relative_eq!(propane.R, 188.55636909, epsilon = 1e-6);
        assert_relative_eq!(propane.hf.unwrap(), -2.374e6, epsilon = 1e3);
        assert!(!propane.has_thermo());
        assert!(matches!(
            propane.thermo_state(298.15),
            Err(ThermoInpError::NoThermoModel(_))
        ));
        assert_eq!(propane.to_json()["thermo"], Value::Null);
    }

    #[test]
    fn test_invalid_molar_mass() {
        let err = ChemSpecies::new("x", 0.0, None, None, PhysicalConstants::default()).unwrap_err();
        assert!(matches!(err, ThermoInpError::InvalidConstant { .. }));
    }

    #[test]
    fn test_reversed_intervals_are_refused() {
        let source = ThermoInpDB::parse(SAMPLE_DATABASE).unwrap();
        let mut intervals = source.get("N2").unwrap().intervals().to_vec();
        intervals.reverse();
        let err = ChemSpecies::new(
            "N2",
            28.0134,
            Some(0.0),
            Some(intervals),
            PhysicalConstants::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ThermoInpError::InvalidIntervals { .. }));
    }

    #[test]
    fn test_species_from_records() {
        let db = chem_db();
        assert_eq!(db.source_len(), 15);
        assert!(db.is_empty());
        let mut db = db;
        db.select_all();
        assert_eq!(db.len(), 15);
        let h2 = db.get("H2").unwrap();
        assert_relative_eq!(h2.R, 8.314510 / 0.00201588, max_relative = 1e-12);
        assert_eq!(h2.bounds(), Some((200.0, 20000.0)));
        let rp1 = db.get("RP-1").unwrap();
        assert_eq!(rp1.Hf, None);
        assert_eq!(rp1.hf, None);
        assert!(!rp1.has_thermo());
    }

    #[test]
    fn test_select() {
        let mut db = chem_db();
        db.select(&["Air", "Ar"]).unwrap();
        assert_eq!(db.names(), vec!["Air", "Ar"]);
        let err = db.select(&["N2", "Adamantium"]).unwrap_err();
        assert_eq!(err.to_string(), "Adamantium is not in the source database");
        assert_eq!(db.len(), 2);
        assert!(matches!(db.get("N2"), Err(ThermoInpError::Lookup(_))));
    }

    #[test]
    fn test_thermo_state_shares_intervals() {
        let mut db = chem_db();
        db.select(&["Air"]).unwrap();
        let air = db.get("Air").unwrap();
        let state = air.thermo_state(200.0).unwrap();
        assert_relative_eq!(state.Cp(), 29.034436, max_relative = 1e-7);
        assert_relative_eq!(state.H(), -2977.634247, max_relative = 1e-8);
        assert_relative_eq!(state.S(), 187.220753, max_relative = 1e-7);
        assert_relative_eq!(state.cp(), 1002.393217, max_relative = 1e-7);
        let intervals = air.intervals.as_ref().unwrap();
        assert!(std::ptr::eq(state.intervals(), &intervals[..]));
    }

    #[test]
    fn test_to_json() {
        let mut db = chem_db();
        db.select(&["Air"]).unwrap();
        let json = db.to_json();
        let air = &json["chemdb"][0];
        assert_eq!(air["name"], "Air");
        assert_eq!(air["molar_mass"]["units"], "kg/mol");
        assert_relative_eq!(
            air["molar_mass"]["value"].as_f64().unwrap(),
            0.0289651159,
            epsilon = 1e-12
        );
        assert_eq!(air["formation_enthalpy"]["value"], -125.53);
        assert_eq!(air["thermo"]["Tmin"], 200.0);
        assert_eq!(air["thermo"]["Tmax"], 6000.0);
        assert_eq!(air["thermo"]["intervals"].as_array().unwrap().len(), 2);
        assert_eq!(
            air["thermo"]["intervals"][0]["coefficients"]
                .as_array()
                .unwrap()
                .len(),
            7
        );
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let mut db = chem_db();
        db.select(&["Ar", "N2"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chemdb.json");
        db.write(&path).unwrap();
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, db.to_json());
        // 39.948e-3 is not exactly 0.039948, the file must keep every bit
        let ar = db.get("Ar").unwrap();
        assert_eq!(
            written["chemdb"][0]["molar_mass"]["value"].as_f64(),
            Some(ar.M)
        );
        assert!(matches!(db.write(&path), Err(ThermoInpError::FileExists(_))));
    }
}
