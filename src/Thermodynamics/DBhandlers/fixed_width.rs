//! # Fixed-width field primitives
//!
//! thermo.inp is a punched-card era format: every value lives at a fixed column range of an
//! 80-column record. Each field is described by a [`Field`] (name + column range) and decoded by
//! one of the decoders below, so the byte-offset contract of every record type can be read off
//! a single table and tested field by field.
//!
//! Column ranges are 0-based and half-open, `end == None` meaning "to the end of the record".
//! Trailing whitespace is frequently stripped from the records in the wild, so slices are
//! clamped to the record length and a missing field reads as blank.
use super::thermoinp_error::{ThermoInpError, ThermoInpResult};

/// width of one record; anything past it is padding
pub const RECORD_WIDTH: usize = 80;
/// width of one Fortran double field (`E16.9`-like, `D` exponent marker)
pub const DOUBLE_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub start: usize,
    pub end: Option<usize>,
}

impl Field {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self {
            name,
            start,
            end: Some(end),
        }
    }
    pub const fn to_end(name: &'static str, start: usize) -> Self {
        Self {
            name,
            start,
            end: None,
        }
    }
    /// raw text of the field; blank if the record is too short
    pub fn slice<'a>(&self, record: &'a str) -> ThermoInpResult<&'a str> {
        let len = record.len();
        let start = self.start.min(len);
        let end = self.end.map_or(len, |e| e.min(len));
        record.get(start..end).ok_or_else(|| {
            ThermoInpError::parse(self.name, record, "field is not on a character boundary")
        })
    }
    /// text with surrounding whitespace removed
    pub fn text<'a>(&self, record: &'a str) -> ThermoInpResult<&'a str> {
        Ok(self.slice(record)?.trim())
    }
    /// text with trailing whitespace removed (names and comments keep leading spaces)
    pub fn text_rtrim<'a>(&self, record: &'a str) -> ThermoInpResult<&'a str> {
        Ok(self.slice(record)?.trim_end())
    }
    pub fn float(&self, record: &str) -> ThermoInpResult<f64> {
        let text = self.text(record)?;
        parse_fortran_double(text)
            .map_err(|reason| ThermoInpError::parse(self.name, record, reason))
    }
    /// blank field -> None, anything else must be a valid number
    pub fn optional_float(&self, record: &str) -> ThermoInpResult<Option<f64>> {
        let text = self.text(record)?;
        if text.is_empty() {
            return Ok(None);
        }
        parse_fortran_double(text)
            .map(Some)
            .map_err(|reason| ThermoInpError::parse(self.name, record, reason))
    }
    pub fn integer(&self, record: &str) -> ThermoInpResult<i32> {
        let text = self.text(record)?;
        text.parse::<i32>().map_err(|e| {
            ThermoInpError::parse(self.name, record, format!("{:?} is not an integer: {}", text, e))
        })
    }
    /// whitespace separated floats
    pub fn floats(&self, record: &str) -> ThermoInpResult<Vec<f64>> {
        self.text(record)?
            .split_whitespace()
            .map(|token| {
                parse_fortran_double(token)
                    .map_err(|reason| ThermoInpError::parse(self.name, record, reason))
            })
            .collect()
    }
    /// consecutive 16-character Fortran doubles
    pub fn doubles(&self, record: &str) -> ThermoInpResult<Vec<f64>> {
        let slice = self.slice(record)?;
        double_array_to_floats(slice)
            .map_err(|reason| ThermoInpError::parse(self.name, record, reason))
    }
}

/// Normalise the Fortran double-precision exponent marker (`1.0D+03`) to the `e` notation and
/// parse. This is the only place where the `D` substitution happens.
pub fn parse_fortran_double(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty numeric field".to_string());
    }
    let normalised = trimmed.replace(['D', 'd'], "e");
    normalised
        .parse::<f64>()
        .map_err(|e| format!("{:?} is not a number: {}", trimmed, e))
}

/// Split a string of 16-character fields into floats. A trailing partial chunk is decoded as
/// well (records may be right-trimmed); blank chunks are errors.
pub fn double_array_to_floats(text: &str) -> Result<Vec<f64>, String> {
    let bytes = text.as_bytes();
    let mut values = Vec::with_capacity(bytes.len() / DOUBLE_WIDTH + 1);
    let mut start = 0;
    while start < bytes.len() {
        let end = (start + DOUBLE_WIDTH).min(bytes.len());
        let chunk = text
            .get(start..end)
            .ok_or_else(|| format!("non-ASCII data in numeric field {:?}", text))?;
        values.push(parse_fortran_double(chunk)?);
        start = end;
    }
    Ok(values)
}

/// Format a value as a 16-character Fortran double: ` 2.500000000D+00`
pub fn format_fortran_double(value: f64) -> String {
    let formatted = format!("{:.9e}", value);
    let (mantissa, exponent) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{:>12}D{}{:02}", mantissa, sign, exponent.abs())
}
