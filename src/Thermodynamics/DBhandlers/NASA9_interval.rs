//! # Temperature interval records
//!
//! Each temperature interval of a species is described by three 80-column records
//! (NASA TP-2002-211556 polynomial form: variable form <= 8-term polynomial with two constants of
//! integration):
//!
//! | record | columns  | field                                               |
//! |--------|----------|-----------------------------------------------------|
//! | 1      | 0..22    | Tmin, Tmax (K)                                      |
//! | 1      | 22       | declared number of coefficients                     |
//! | 1      | 23..63   | exponents of T, up to 8 values                      |
//! | 1      | 65..     | H(298.15) - H(0), J/mol                             |
//! | 2      | 0..80    | a1..a5, five 16-character Fortran doubles           |
//! | 3      | 0..32    | a6, a7                                              |
//! | 3      | 32..48   | a8 (documented by NASA, never used, often blank)    |
//! | 3      | 48..80   | b1, b2 integration constants                        |
//!
//! Only seven coefficients are used for Cp/R; the declared count is kept as metadata.
use super::fixed_width::{Field, RECORD_WIDTH, format_fortran_double};
use super::thermoinp_error::{ThermoInpError, ThermoInpResult};
use approx::relative_eq;
use serde::{Deserialize, Serialize};

pub const BOUNDS: Field = Field::new("temperature bounds", 0, 22);
pub const NCOEFF: Field = Field::new("number of coefficients", 22, 23);
pub const EXPONENTS: Field = Field::new("exponents", 23, 63);
pub const ENTHALPY_OFFSET: Field = Field::to_end("H(298.15)-H(0)", 65);
pub const COEFFS_A1_A5: Field = Field::new("coefficients a1..a5", 0, RECORD_WIDTH);
pub const COEFFS_A6_A7: Field = Field::new("coefficients a6, a7", 0, 32);
pub const COEFF_A8: Field = Field::new("coefficient a8", 32, 48);
pub const INTEGRATION_CONSTANTS: Field =
    Field::new("integration constants b1, b2", 48, RECORD_WIDTH);

/// number of polynomial coefficients used for Cp/R
pub const NUMBER_OF_COEFFICIENTS: usize = 7;
/// number of records describing one interval
pub const RECORDS_PER_INTERVAL: usize = 3;

/// Polynomial fit of Cp/R over one temperature sub-range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureInterval {
    /// interval bounds (Tmin, Tmax), K
    pub bounds: (f64, f64),
    /// declared number of coefficients/terms
    pub ncoeff: u8,
    /// exponents of T for each term, padded with 0
    pub exponents: [i8; 8],
    /// H(298.15) - H(0), J/mol
    pub enthalpy_offset: f64,
    /// a1..a7
    pub coefficients: [f64; NUMBER_OF_COEFFICIENTS],
    /// eighth coefficient, kept for round trips only
    pub a8: Option<f64>,
    /// (b1, b2): enthalpy and entropy constants of integration
    pub integration_constants: (f64, f64),
}

impl TemperatureInterval {
    pub fn t_min(&self) -> f64 {
        self.bounds.0
    }
    pub fn t_max(&self) -> f64 {
        self.bounds.1
    }
    /// inclusive on both ends
    pub fn contains(&self, t: f64) -> bool {
        self.bounds.0 <= t && t <= self.bounds.1
    }

    /// Parse the three records of an interval
    pub fn from_records<S: AsRef<str>>(records: &[S]) -> ThermoInpResult<Self> {
        if records.len() != RECORDS_PER_INTERVAL {
            let joined = records
                .iter()
                .map(|r| r.as_ref())
                .collect::<Vec<_>>()
                .join("\n");
            return Err(ThermoInpError::parse(
                "temperature interval",
                &joined,
                format!(
                    "expected {} records, got {}",
                    RECORDS_PER_INTERVAL,
                    records.len()
                ),
            ));
        }
        let (metadata, array1, array2) = (
            records[0].as_ref(),
            records[1].as_ref(),
            records[2].as_ref(),
        );

        // metadata record first
        let bounds = match BOUNDS.floats(metadata)?.as_slice() {
            &[t_min, t_max] => (t_min, t_max),
            other => {
                return Err(ThermoInpError::parse(
                    BOUNDS.name,
                    metadata,
                    format!("expected 2 values, got {}", other.len()),
                ));
            }
        };
        if !(bounds.0 < bounds.1) {
            return Err(ThermoInpError::parse(
                BOUNDS.name,
                metadata,
                format!("Tmin {} is not below Tmax {}", bounds.0, bounds.1),
            ));
        }
        let ncoeff = NCOEFF.integer(metadata)?;
        let ncoeff = u8::try_from(ncoeff).map_err(|_| {
            ThermoInpError::parse(NCOEFF.name, metadata, format!("invalid count {}", ncoeff))
        })?;
        let exponents = parse_exponents(metadata)?;
        let enthalpy_offset = ENTHALPY_OFFSET.float(metadata)?;

        // coefficient records
        let mut coeffs = COEFFS_A1_A5.doubles(array1)?;
        if coeffs.len() != 5 {
            return Err(ThermoInpError::parse(
                COEFFS_A1_A5.name,
                array1,
                format!("expected 5 coefficients, got {}", coeffs.len()),
            ));
        }
        coeffs.extend(COEFFS_A6_A7.doubles(array2)?);
        let coefficients: [f64; NUMBER_OF_COEFFICIENTS] =
            coeffs.as_slice().try_into().map_err(|_| {
                ThermoInpError::parse(
                    COEFFS_A6_A7.name,
                    array2,
                    format!(
                        "expected {} coefficients, got {}",
                        NUMBER_OF_COEFFICIENTS,
                        coeffs.len()
                    ),
                )
            })?;
        let a8 = COEFF_A8.optional_float(array2)?;
        let integration_constants = match INTEGRATION_CONSTANTS.doubles(array2)?.as_slice() {
            &[b1, b2] => (b1, b2),
            other => {
                return Err(ThermoInpError::parse(
                    INTEGRATION_CONSTANTS.name,
                    array2,
                    format!("expected 2 constants, got {}", other.len()),
                ));
            }
        };

        Ok(Self {
            bounds,
            ncoeff,
            exponents,
            enthalpy_offset,
            coefficients,
            a8,
            integration_constants,
        })
    }

    /// Fixed-width records of the interval, the inverse of [`TemperatureInterval::from_records`]
    pub fn to_records(&self) -> [String; RECORDS_PER_INTERVAL] {
        let exponents: String = self
            .exponents
            .iter()
            .map(|e| format!("{:>5.1}", f64::from(*e)))
            .collect();
        let metadata = format!(
            "{:>11.3}{:>11.3}{}{}  {:>15.3}",
            self.bounds.0, self.bounds.1, self.ncoeff, exponents, self.enthalpy_offset
        );
        let array1: String = self.coefficients[..5]
            .iter()
            .map(|a| format_fortran_double(*a))
            .collect();
        let a8 = self
            .a8
            .map_or_else(|| " ".repeat(16), format_fortran_double);
        let array2 = format!(
            "{}{}{}{}{}",
            format_fortran_double(self.coefficients[5]),
            format_fortran_double(self.coefficients[6]),
            a8,
            format_fortran_double(self.integration_constants.0),
            format_fortran_double(self.integration_constants.1)
        );
        [metadata, array1, array2]
    }
}

fn parse_exponents(metadata: &str) -> ThermoInpResult<[i8; 8]> {
    let values = EXPONENTS.floats(metadata)?;
    if values.len() > 8 {
        return Err(ThermoInpError::parse(
            EXPONENTS.name,
            metadata,
            format!("at most 8 exponents expected, got {}", values.len()),
        ));
    }
    let mut exponents = [0i8; 8];
    for (slot, value) in exponents.iter_mut().zip(values) {
        let truncated = value.trunc();
        if !(f64::from(i8::MIN)..=f64::from(i8::MAX)).contains(&truncated) {
            return Err(ThermoInpError::parse(
                EXPONENTS.name,
                metadata,
                format!("exponent {} out of range", value),
            ));
        }
        *slot = truncated as i8;
    }
    Ok(exponents)
}

/// Every interval must have Tmin < Tmax and each Tmax must equal the next Tmin
pub fn check_contiguous(intervals: &[TemperatureInterval]) -> Result<(), String> {
    if let Some(inverted) = intervals.iter().find(|i| !(i.t_min() < i.t_max())) {
        return Err(format!("interval {:?} is empty or inverted", inverted.bounds));
    }
    for pair in intervals.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if !relative_eq!(lower.t_max(), upper.t_min(), max_relative = 1e-12) {
            return Err(format!(
                "intervals {:?} and {:?} are not contiguous",
                lower.bounds, upper.bounds
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const AR_INTERVAL_2: [&str; 3] = [
        "   1000.000   6000.0007 -2.0 -1.0  0.0  1.0  2.0  3.0  4.0  0.0         6197.428",
        " 2.010538475D+01-5.992661070D-02 2.500069401D+00-3.992141160D-08 1.205272140D-11",
        "-1.819015576D-15 1.078576636D-19                -7.449939610D+02 4.379180110D+00",
    ];

    #[test]
    fn test_from_records() {
        let interval = TemperatureInterval::from_records(&AR_INTERVAL_2).unwrap();
        assert_eq!(interval.bounds, (1000.0, 6000.0));
        assert_eq!(interval.t_min(), 1000.0);
        assert_eq!(interval.t_max(), 6000.0);
        assert_eq!(interval.ncoeff, 7);
        assert_eq!(interval.exponents, [-2, -1, 0, 1, 2, 3, 4, 0]);
        assert_eq!(interval.enthalpy_offset, 6197.428);
        assert_relative_eq!(interval.coefficients[0], 2.010538475e1);
        assert_relative_eq!(interval.coefficients[4], 1.205272140e-11);
        assert_relative_eq!(interval.coefficients[5], -1.819015576e-15);
        assert_relative_eq!(interval.coefficients[6], 1.078576636e-19);
        assert_eq!(interval.a8, None);
        assert_eq!(interval.integration_constants, (-7.449939610e2, 4.379180110));
    }

    #[test]
    fn test_eighth_coefficient_is_kept() {
        let mut records = AR_INTERVAL_2.map(String::from);
        records[2].replace_range(32..48, " 1.000000000D+00");
        let interval = TemperatureInterval::from_records(&records).unwrap();
        assert_eq!(interval.a8, Some(1.0));
        assert_eq!(interval.coefficients.len(), NUMBER_OF_COEFFICIENTS);
    }

    #[test]
    fn test_to_records_reproduces_source() {
        let interval = TemperatureInterval::from_records(&AR_INTERVAL_2).unwrap();
        let records = interval.to_records();
        assert_eq!(records, AR_INTERVAL_2.map(String::from));
    }

    #[test]
    fn test_padding_past_last_column_is_ignored() {
        let records = AR_INTERVAL_2.map(|r| format!("{}  ", r));
        let interval = TemperatureInterval::from_records(&records).unwrap();
        assert_eq!(
            interval,
            TemperatureInterval::from_records(&AR_INTERVAL_2).unwrap()
        );
    }

    #[test]
    fn test_wrong_record_count() {
        let err = TemperatureInterval::from_records(&AR_INTERVAL_2[..2]).unwrap_err();
        assert!(matches!(err, ThermoInpError::Parse { field: "temperature interval", .. }));
    }

    #[test]
    fn test_bad_coefficient_field() {
        let mut records = AR_INTERVAL_2.map(String::from);
        records[1].replace_range(0..16, " 2.0105384X5D+01");
        let err = TemperatureInterval::from_records(&records).unwrap_err();
        assert!(matches!(err, ThermoInpError::Parse { field: "coefficients a1..a5", .. }));
    }

    #[test]
    fn test_missing_coefficient_is_not_defaulted() {
        let mut records = AR_INTERVAL_2.map(String::from);
        // a7 blanked out
        records[2].replace_range(16..32, "                ");
        assert!(TemperatureInterval::from_records(&records).is_err());
    }

    #[test]
    fn test_truncated_second_record() {
        let mut records = AR_INTERVAL_2.map(String::from);
        records[1].truncate(64);
        let err = TemperatureInterval::from_records(&records).unwrap_err();
        assert!(err.to_string().contains("expected 5 coefficients, got 4"));
    }

    #[test]
    fn test_inverted_bounds() {
        let mut records = AR_INTERVAL_2.map(String::from);
        records[0].replace_range(0..22, "   6000.000   1000.000");
        let err = TemperatureInterval::from_records(&records).unwrap_err();
        assert!(matches!(err, ThermoInpError::Parse { field: "temperature bounds", .. }));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let interval = TemperatureInterval::from_records(&AR_INTERVAL_2).unwrap();
        assert!(interval.contains(1000.0));
        assert!(interval.contains(6000.0));
        assert!(!interval.contains(999.9));
    }
}
