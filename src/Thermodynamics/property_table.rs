//! Tabulated standard-state functions of one species over a list of temperatures.
#![allow(non_snake_case)]
use crate::Thermodynamics::DBhandlers::thermoinp_error::{ThermoInpError, ThermoInpResult};
use crate::Thermodynamics::chem_db::ChemSpecies;
use prettytable::{Cell, Row, Table};
use std::fmt;

pub const HEADER: [&str; 5] = ["T", "Cp", "H-H298", "S", "H"];
pub const UNITS: [&str; 5] = ["K", "J/mol-K", "kJ/mol", "J/mol-K", "kJ/mol"];

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable {
    pub species: String,
    pub temperatures: Vec<f64>,
    /// rows of (T, Cp, H - Hf, S, H)
    pub body: Vec<[f64; 5]>,
}

impl PropertyTable {
    pub fn new(temperatures: &[f64], species: &ChemSpecies) -> ThermoInpResult<Self> {
        let Hf = species
            .Hf
            .ok_or_else(|| ThermoInpError::NoFormationEnthalpy(species.name.clone()))?;
        let mut state = match temperatures.first() {
            Some(&T) => species.thermo_state(T)?,
            None => {
                return Ok(Self {
                    species: species.name.clone(),
                    temperatures: Vec::new(),
                    body: Vec::new(),
                });
            }
        };
        let mut body = Vec::with_capacity(temperatures.len());
        for &T in temperatures {
            state.set_temperature(T)?;
            let H = state.H() / 1000.0;
            body.push([T, state.Cp(), H - Hf / 1000.0, state.S(), H]);
        }
        Ok(Self {
            species: species.name.clone(),
            temperatures: temperatures.to_vec(),
            body,
        })
    }

    /// Fixed-width text, ten characters per column
    pub fn formatted(&self) -> String {
        let header: String = HEADER.iter().map(|h| format!("{:>10}", h)).collect();
        let units: String = UNITS.iter().map(|u| format!("{:>10}", u)).collect();
        let mut lines = vec![header.clone(), units, "-".repeat(header.len())];
        for row in &self.body {
            let values: String = row[1..]
                .iter()
                .map(|&v| format!("{:>10}", fixed3(v)))
                .collect();
            lines.push(format!("  {:<8}{}", row[0], values));
        }
        lines.join("\n")
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(HEADER.iter().map(|h| Cell::new(h)).collect()));
        table.add_row(Row::new(UNITS.iter().map(|u| Cell::new(u)).collect()));
        for row in &self.body {
            let mut cells = vec![Cell::new(&row[0].to_string())];
            cells.extend(
                row[1..]
                    .iter()
                    .map(|&v| Cell::new(&fixed3(v))),
            );
            table.add_row(Row::new(cells));
        }
        table
    }

    pub fn print(&self) {
        println!("{} ({})", self, self.species);
        self.to_table().printstd();
    }
}

/// three decimals, with `-0.000` printed as `0.000`
fn fixed3(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

impl fmt::Display for PropertyTable {
    /// `Property table: T = 200-2000 K, 3 intervals (moles)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.temperatures.first(), self.temperatures.last()) {
            (Some(first), Some(last)) => write!(
                f,
                "Property table: T = {}-{} K, {} intervals (moles)",
                first,
                last,
                self.temperatures.len()
            ),
            _ => write!(f, "Property table: empty (moles)"),
        }
    }
}
