//! Error type shared by the thermo.inp parser, the database views and the
//! polynomial evaluator.
use thiserror::Error;

/// Result alias used throughout the crate
pub type ThermoInpResult<T> = Result<T, ThermoInpError>;

#[derive(Debug, Error)]
pub enum ThermoInpError {
    /// section anchors or sentinels of the database are missing
    #[error("Malformed database: {0}")]
    Format(String),
    /// a fixed-width field could not be decoded or record counts are inconsistent
    #[error("Failed to parse {field}{}: {reason} (record: {record:?})", species_suffix(.species))]
    Parse {
        species: Option<String>,
        field: &'static str,
        record: String,
        reason: String,
    },
    /// temperature is not strictly positive
    #[error("Invalid temperature {0} K: temperature must be positive")]
    Domain(f64),
    /// temperature outside of the span covered by the temperature intervals
    #[error("Temperature {temperature} K out of bounds. Valid range: {t_min} - {t_max} K")]
    OutOfRange {
        temperature: f64,
        t_min: f64,
        t_max: f64,
    },
    #[error("{0} is not in the source database")]
    Lookup(String),
    /// species is known only by an assigned enthalpy, no polynomial is available
    #[error("Species {0} has no temperature intervals, thermodynamic functions are unavailable")]
    NoThermoModel(String),
    /// interval list that is not ascending and contiguous
    #[error("Invalid temperature intervals of {species}: {reason}")]
    InvalidIntervals { species: String, reason: String },
    #[error("Species {0} has no heat of formation")]
    NoFormationEnthalpy(String),
    #[error("Invalid physical constant {name}: {value}")]
    InvalidConstant { name: &'static str, value: f64 },
    #[error("No subset criteria selected")]
    NoSubsetCriteria,
    #[error("{0} exists")]
    FileExists(String),
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

fn species_suffix(species: &Option<String>) -> String {
    match species {
        Some(name) => format!(" of species {}", name),
        None => String::new(),
    }
}

impl ThermoInpError {
    pub fn parse(field: &'static str, record: &str, reason: impl Into<String>) -> Self {
        ThermoInpError::Parse {
            species: None,
            field,
            record: record.to_string(),
            reason: reason.into(),
        }
    }
    /// attach the species name to a parse error raised before the name was known to the caller
    pub fn in_species(self, name: &str) -> Self {
        match self {
            ThermoInpError::Parse {
                species: None,
                field,
                record,
                reason,
            } => ThermoInpError::Parse {
                species: Some(name.to_string()),
                field,
                record,
                reason,
            },
            other => other,
        }
    }
}
