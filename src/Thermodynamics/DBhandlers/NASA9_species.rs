//! # Species datasets
//!
//! A species dataset consists of a header record, a metadata record and a tail:
//!
//! | record | columns | field                                                    |
//! |--------|---------|----------------------------------------------------------|
//! | 1      | 0..18   | name                                                     |
//! | 1      | 18..    | comments and references                                  |
//! | 2      | 1       | number of temperature intervals (0..9)                   |
//! | 2      | 2..10   | reference-date code                                      |
//! | 2      | 10..50  | formula, five slots of 2-char element + 6-char count     |
//! | 2      | 51      | phase (0 gas, nonzero condensed)                         |
//! | 2      | 52..65  | molecular weight, kg/kmol                                |
//! | 2      | 65..    | heat of formation (intervals) or assigned enthalpy, J/mol|
//!
//! With temperature intervals the tail is made of three records per interval. Without them a
//! single record holds the reference temperature of the assigned enthalpy as its first word.
use super::NASA9_interval::{RECORDS_PER_INTERVAL, TemperatureInterval, check_contiguous};
use super::fixed_width::Field;
use super::thermoinp_error::{ThermoInpError, ThermoInpResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME: Field = Field::new("name", 0, 18);
pub const COMMENTS: Field = Field::to_end("comments", 18);
pub const NINTERVALS: Field = Field::new("number of intervals", 1, 2);
pub const REFCODE: Field = Field::new("reference code", 2, 10);
pub const FORMULA: Field = Field::new("formula", 10, 50);
pub const PHASE: Field = Field::new("phase", 51, 52);
pub const MOLAR_MASS: Field = Field::new("molar mass", 52, 65);
pub const REFERENCE_ENTHALPY: Field = Field::to_end("reference enthalpy", 65);

const FORMULA_SLOTS: usize = 5;
const FORMULA_SLOT_WIDTH: usize = 8;
const SYMBOL_WIDTH: usize = 2;
const COUNT_WIDTH: usize = 6;
const MOLAR_MASS_WIDTH: usize = 13;

/// Elemental composition as (element symbol, number of atoms) pairs in source order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Formula(pub Vec<(String, f64)>);

impl Formula {
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(element, _)| element.as_str())
    }
    pub fn count(&self, element: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(element))
            .map(|(_, n)| *n)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Formula {
    /// `C:1.00 O:2.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(element, count)| format!("{}:{}", element, format_count(*count)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Decode the formula region of the metadata record. Slots with a blank element symbol and
/// slots with a zero count are placeholders and are omitted.
pub fn decode_formula(record: &str) -> ThermoInpResult<Formula> {
    let region = FORMULA.slice(record)?;
    let mut entries = Vec::new();
    for slot in 0..FORMULA_SLOTS {
        let start = FORMULA.start + slot * FORMULA_SLOT_WIDTH;
        let symbol = Field::new("formula element", start, start + SYMBOL_WIDTH).text(record)?;
        if symbol.is_empty() {
            continue;
        }
        let count_field = Field::new(
            "formula count",
            start + SYMBOL_WIDTH,
            start + FORMULA_SLOT_WIDTH,
        );
        let count = count_field.float(record)?;
        if count == 0.0 {
            continue;
        }
        entries.push((symbol.to_string(), count));
    }
    if region.trim().is_empty() {
        log::warn!("blank formula region in record {:?}", record);
    }
    Ok(Formula(entries))
}

/// count in at most six columns: two decimals when exact, more when the value needs them
fn format_count(count: f64) -> String {
    let two = format!("{:.2}", count);
    if two.parse::<f64>().ok() == Some(count) || two.len() >= COUNT_WIDTH {
        return two;
    }
    let integer_digits = format!("{:.0}", count.trunc()).len();
    let decimals = COUNT_WIDTH.saturating_sub(integer_digits + 1).max(2);
    format!("{:.*}", decimals, count)
}

/// molar mass in its 13 columns: seven decimals when exact, otherwise the shortest form that
/// fits, rounded if even that is too wide
fn format_molar_mass(value: f64) -> String {
    let seven = format!("{:.7}", value);
    if seven.parse::<f64>().ok() == Some(value) || seven.len() >= MOLAR_MASS_WIDTH {
        return seven;
    }
    let shortest = value.to_string();
    if shortest.len() <= MOLAR_MASS_WIDTH {
        return shortest;
    }
    let integer_digits = format!("{:.0}", value.trunc()).len();
    let decimals = MOLAR_MASS_WIDTH.saturating_sub(integer_digits + 1).max(7);
    format!("{:.*}", decimals, value)
}

/// Thermodynamic data of a species; which variant applies is fixed by the number of
/// temperature intervals in the metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ThermoModel {
    /// nintervals > 0
    WithIntervals {
        /// J/mol at 298.15 K
        heat_of_formation: f64,
        /// ascending, contiguous
        intervals: Vec<TemperatureInterval>,
    },
    /// nintervals == 0
    SinglePoint {
        /// J/mol
        assigned_enthalpy: f64,
        /// K
        reference_temperature: f64,
    },
}

/// Chemical species metadata and thermodynamic data as stored in thermo.inp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// species name/ID (usually formula)
    pub name: String,
    /// references and comments
    pub comments: String,
    /// reference-date code
    pub refcode: String,
    pub formula: Formula,
    /// condensed phases nonzero
    pub phase: i32,
    /// molecular weight, kg/kmol
    pub molar_mass: f64,
    pub model: ThermoModel,
}

impl SpeciesRecord {
    pub fn nintervals(&self) -> usize {
        self.intervals().len()
    }
    pub fn intervals(&self) -> &[TemperatureInterval] {
        match &self.model {
            ThermoModel::WithIntervals { intervals, .. } => intervals,
            ThermoModel::SinglePoint { .. } => &[],
        }
    }
    pub fn heat_of_formation(&self) -> Option<f64> {
        match self.model {
            ThermoModel::WithIntervals {
                heat_of_formation, ..
            } => Some(heat_of_formation),
            ThermoModel::SinglePoint { .. } => None,
        }
    }
    pub fn assigned_enthalpy(&self) -> Option<f64> {
        match self.model {
            ThermoModel::SinglePoint {
                assigned_enthalpy, ..
            } => Some(assigned_enthalpy),
            ThermoModel::WithIntervals { .. } => None,
        }
    }
    pub fn reference_temperature(&self) -> Option<f64> {
        match self.model {
            ThermoModel::SinglePoint {
                reference_temperature,
                ..
            } => Some(reference_temperature),
            ThermoModel::WithIntervals { .. } => None,
        }
    }
    /// (Tmin of the first interval, Tmax of the last one)
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let intervals = self.intervals();
        Some((intervals.first()?.t_min(), intervals.last()?.t_max()))
    }
    pub fn is_gas(&self) -> bool {
        self.phase == 0
    }

    /// Parse the records of one species dataset
    pub fn from_records<S: AsRef<str>>(records: &[S]) -> ThermoInpResult<Self> {
        let (head, body, tail) = match records {
            [head, body, tail @ ..] => (head.as_ref(), body.as_ref(), tail),
            _ => {
                let record = records.first().map_or("", |r| r.as_ref());
                return Err(ThermoInpError::parse(
                    "species dataset",
                    record,
                    format!("expected at least 2 records, got {}", records.len()),
                ));
            }
        };
        let name = NAME.text_rtrim(head)?.to_string();
        Self::parse_named(name.clone(), head, body, tail).map_err(|e| e.in_species(&name))
    }

    fn parse_named<S: AsRef<str>>(
        name: String,
        head: &str,
        body: &str,
        tail: &[S],
    ) -> ThermoInpResult<Self> {
        if name.is_empty() {
            return Err(ThermoInpError::parse(NAME.name, head, "blank species name"));
        }
        let comments = COMMENTS.text_rtrim(head)?.to_string();

        // non-polynomial data
        let nintervals = NINTERVALS.integer(body)?;
        let nintervals = usize::try_from(nintervals).map_err(|_| {
            ThermoInpError::parse(NINTERVALS.name, body, format!("invalid count {}", nintervals))
        })?;
        let refcode = REFCODE.text(body)?.to_string();
        let formula = decode_formula(body)?;
        let phase = PHASE.integer(body)?;
        let molar_mass = MOLAR_MASS.float(body)?;
        // meaning depends on whether temperature intervals are present
        let reference_enthalpy = REFERENCE_ENTHALPY.float(body)?;

        let model = if nintervals > 0 {
            ThermoModel::WithIntervals {
                heat_of_formation: reference_enthalpy,
                intervals: parse_intervals(nintervals, tail)?,
            }
        } else {
            ThermoModel::SinglePoint {
                assigned_enthalpy: reference_enthalpy,
                reference_temperature: parse_reference_temperature(tail)?,
            }
        };
        Ok(Self {
            name,
            comments,
            refcode,
            formula,
            phase,
            molar_mass,
            model,
        })
    }

    /// Fixed-width records of the dataset, the inverse of [`SpeciesRecord::from_records`]
    pub fn to_records(&self) -> Vec<String> {
        let mut records = Vec::with_capacity(2 + RECORDS_PER_INTERVAL * self.nintervals());
        let head = format!("{:<18}{}", self.name, self.comments);
        records.push(format!("{:<80}", head));

        let mut formula: String = self
            .formula
            .0
            .iter()
            .take(FORMULA_SLOTS)
            .map(|(element, count)| format!("{:<2}{:>6}", element, format_count(*count)))
            .collect();
        for _ in self.formula.0.len()..FORMULA_SLOTS {
            formula.push_str(&format!("{:<2}{:>6}", "", "0.00"));
        }
        let reference_enthalpy = match self.model {
            ThermoModel::WithIntervals {
                heat_of_formation, ..
            } => heat_of_formation,
            ThermoModel::SinglePoint {
                assigned_enthalpy, ..
            } => assigned_enthalpy,
        };
        records.push(format!(
            " {}{:<8}{}{:>2}{:>13}{:>15.3}",
            self.nintervals(),
            format!(" {}", self.refcode),
            formula,
            self.phase,
            format_molar_mass(self.molar_mass),
            reference_enthalpy
        ));
        match &self.model {
            ThermoModel::WithIntervals { intervals, .. } => {
                for interval in intervals {
                    records.extend(interval.to_records());
                }
            }
            ThermoModel::SinglePoint {
                reference_temperature,
                ..
            } => records.push(format!("{:>11.3}", reference_temperature)),
        }
        records
    }
}

fn parse_intervals<S: AsRef<str>>(
    nintervals: usize,
    tail: &[S],
) -> ThermoInpResult<Vec<TemperatureInterval>> {
    let first_record = || tail.first().map_or("", |r| r.as_ref());
    if tail.len() % RECORDS_PER_INTERVAL != 0 {
        return Err(ThermoInpError::parse(
            "temperature intervals",
            first_record(),
            format!(
                "{} records is not a multiple of {}",
                tail.len(),
                RECORDS_PER_INTERVAL
            ),
        ));
    }
    if tail.len() != nintervals * RECORDS_PER_INTERVAL {
        return Err(ThermoInpError::parse(
            "temperature intervals",
            first_record(),
            format!(
                "{} intervals declared, {} present",
                nintervals,
                tail.len() / RECORDS_PER_INTERVAL
            ),
        ));
    }
    // each interval is described by three records
    let intervals = tail
        .chunks(RECORDS_PER_INTERVAL)
        .map(TemperatureInterval::from_records)
        .collect::<ThermoInpResult<Vec<_>>>()?;
    check_contiguous(&intervals)
        .map_err(|reason| ThermoInpError::parse("temperature intervals", first_record(), reason))?;
    Ok(intervals)
}

fn parse_reference_temperature<S: AsRef<str>>(tail: &[S]) -> ThermoInpResult<f64> {
    match tail {
        [record] => {
            let record = record.as_ref();
            // first word of the record
            let word = record.split_whitespace().next().unwrap_or("");
            super::fixed_width::parse_fortran_double(word)
                .map_err(|reason| ThermoInpError::parse("reference temperature", record, reason))
        }
        _ => Err(ThermoInpError::parse(
            "reference temperature",
            tail.first().map_or("", |r| r.as_ref()),
            format!("expected a single record, got {}", tail.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AR: [&str; 11] = [
        "Ar                Ref-Elm. Moore,1971. Gordon,1999.                             ",
        " 3 g 3/98 AR  1.00    0.00    0.00    0.00    0.00 0   39.9480000          0.000",
        "    200.000   1000.0007 -2.0 -1.0  0.0  1.0  2.0  3.0  4.0  0.0         6197.428",
        " 0.000000000D+00 0.000000000D+00 2.500000000D+00 0.000000000D+00 0.000000000D+00",
        " 0.000000000D+00 0.000000000D+00                -7.453750000D+02 4.379674910D+00",
        "   1000.000   6000.0007 -2.0 -1.0  0.0  1.0  2.0  3.0  4.0  0.0         6197.428",
        " 2.010538475D+01-5.992661070D-02 2.500069401D+00-3.992141160D-08 1.205272140D-11",
        "-1.819015576D-15 1.078576636D-19                -7.449939610D+02 4.379180110D+00",
        "   6000.000  20000.0007 -2.0 -1.0  0.0  1.0  2.0  3.0  4.0  0.0         6197.428",
        "-9.951265080D+08 6.458887260D+05-1.675894697D+02 2.319933363D-02-1.721080911D-06",
        " 6.531938460D-11-9.740147729D-16                -5.078300340D+06 1.465298484D+03",
    ];

    const RP1: [&str; 3] = [
        "RP-1              Mehta et.al. AIAA 95-2962 1995. Hcomb(high) = 19923.BTU/#     ",
        " 0 gll/00 C   1.00H   1.95    0.00    0.00    0.00 1   13.9761830     -24717.700",
        "    298.150",
    ];

    #[test]
    fn test_species_with_intervals() {
        let ar = SpeciesRecord::from_records(&AR).unwrap();
        assert_eq!(ar.name, "Ar");
        assert_eq!(ar.comments, "Ref-Elm. Moore,1971. Gordon,1999.");
        assert_eq!(ar.refcode, "g 3/98");
        assert_eq!(ar.formula, Formula(vec![("AR".to_string(), 1.0)]));
        assert_eq!(ar.formula.to_string(), "AR:1.00");
        assert_eq!(ar.phase, 0);
        assert!(ar.is_gas());
        assert_eq!(ar.molar_mass, 39.948);
        assert_eq!(ar.nintervals(), 3);
        assert_eq!(ar.heat_of_formation(), Some(0.0));
        assert_eq!(ar.assigned_enthalpy(), None);
        assert_eq!(ar.reference_temperature(), None);
        assert_eq!(ar.bounds(), Some((200.0, 20000.0)));
        assert_eq!(ar.intervals()[0].coefficients, [0.0, 0.0, 2.5, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(ar.intervals()[0].integration_constants, (-745.375, 4.37967491));
    }

    #[test]
    fn test_single_point_species() {
        let rp1 = SpeciesRecord::from_records(&RP1).unwrap();
        assert_eq!(rp1.name, "RP-1");
        assert_eq!(rp1.refcode, "gll/00");
        assert_eq!(rp1.phase, 1);
        assert_eq!(rp1.formula.to_string(), "C:1.00 H:1.95");
        assert_eq!(
            rp1.model,
            ThermoModel::SinglePoint {
                assigned_enthalpy: -24717.7,
                reference_temperature: 298.15
            }
        );
        assert_eq!(rp1.heat_of_formation(), None);
        assert!(rp1.intervals().is_empty());
        assert_eq!(rp1.bounds(), None);
    }

    #[test]
    fn test_single_point_needs_exactly_one_tail_record() {
        let err = SpeciesRecord::from_records(&RP1[..2]).unwrap_err();
        assert!(matches!(
            err,
            ThermoInpError::Parse { field: "reference temperature", species: Some(ref s), .. } if s == "RP-1"
        ));
    }

    #[test]
    fn test_tail_not_multiple_of_three() {
        let err = SpeciesRecord::from_records(&AR[..10]).unwrap_err();
        assert!(err.to_string().contains("not a multiple of 3"));
        assert!(err.to_string().contains("species Ar"));
    }

    #[test]
    fn test_declared_interval_count_must_match() {
        let err = SpeciesRecord::from_records(&AR[..8]).unwrap_err();
        assert!(err.to_string().contains("3 intervals declared, 2 present"));
    }

    #[test]
    fn test_non_contiguous_intervals() {
        let mut records = AR.map(String::from);
        records[5].replace_range(0..11, "   1100.000");
        let err = SpeciesRecord::from_records(&records).unwrap_err();
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn test_interval_error_carries_species_name() {
        let mut records = AR.map(String::from);
        records[9].replace_range(0..16, "-9.95126508QD+08");
        let err = SpeciesRecord::from_records(&records).unwrap_err();
        assert!(matches!(
            err,
            ThermoInpError::Parse { field: "coefficients a1..a5", species: Some(ref s), .. } if s == "Ar"
        ));
    }

    #[test]
    fn test_bad_molar_mass() {
        let mut records = RP1.map(String::from);
        records[1].replace_range(52..65, "   13.97X1830");
        let err = SpeciesRecord::from_records(&records).unwrap_err();
        assert!(matches!(err, ThermoInpError::Parse { field: "molar mass", .. }));
    }

    #[test]
    fn test_decode_formula_skips_blank_and_zero_slots() {
        let body = " 2 g 6/01 C  10.00        H  16.00O   0.00    0.00 0  136.2340400     -86855.900";
        let formula = decode_formula(body).unwrap();
        assert_eq!(
            formula.0,
            vec![("C".to_string(), 10.0), ("H".to_string(), 16.0)]
        );
        assert_eq!(formula.count("c"), Some(10.0));
        assert_eq!(formula.count("O"), None);
        assert_eq!(formula.elements().collect::<Vec<_>>(), vec!["C", "H"]);
    }

    #[test]
    fn test_decode_formula_fractional_counts() {
        let body = " 2 g 9/95 N 1.5617O 0.4196AR0.0094C 0.0003    0.00 0   28.9651159       -125.530";
        let formula = decode_formula(body).unwrap();
        assert_eq!(formula.0.len(), 4);
        assert_eq!(formula.count("AR"), Some(0.0094));
        assert_eq!(formula.to_string(), "N:1.5617 O:0.4196 AR:0.0094 C:0.0003");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1.0), "1.00");
        assert_eq!(format_count(10.0), "10.00");
        assert_eq!(format_count(1.95), "1.95");
        assert_eq!(format_count(1.5617), "1.5617");
    }

    #[test]
    fn test_format_molar_mass() {
        assert_eq!(format_molar_mass(39.948), "39.9480000");
        assert_eq!(format_molar_mass(0.0005486), "0.0005486");
        assert_eq!(format_molar_mass(0.0005485799), "0.0005485799");
        assert_eq!(format_molar_mass(0.000548579903), "0.00054857990");
    }

    #[test]
    fn test_round_trip_keeps_molar_mass_digits() {
        let mut ar = SpeciesRecord::from_records(&AR).unwrap();
        ar.molar_mass = 0.0005485799;
        let records = ar.to_records();
        assert_eq!(records[1].len(), 80);
        assert_eq!(&records[1][52..65], " 0.0005485799");
        assert_eq!(SpeciesRecord::from_records(&records).unwrap(), ar);
    }

    #[test]
    fn test_round_trip() {
        let ar = SpeciesRecord::from_records(&AR).unwrap();
        let records = ar.to_records();
        assert_eq!(records, AR.map(String::from).to_vec());
        assert_eq!(SpeciesRecord::from_records(&records).unwrap(), ar);

        let rp1 = SpeciesRecord::from_records(&RP1).unwrap();
        let reparsed = SpeciesRecord::from_records(&rp1.to_records()).unwrap();
        assert_eq!(reparsed, rp1);
    }

    #[test]
    fn test_too_few_records() {
        let err = SpeciesRecord::from_records(&AR[..1]).unwrap_err();
        assert!(matches!(err, ThermoInpError::Parse { field: "species dataset", .. }));
    }
}
