use ThermoInp::Examples::thermoinp_examples::thermoinp_examples;
use ThermoInp::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
use ThermoInp::Thermodynamics::DBhandlers::thermoinp_error::ThermoInpResult;
use ThermoInp::Thermodynamics::chem_db::ChemDB;
use ThermoInp::Thermodynamics::constants::PhysicalConstants;
use ThermoInp::Thermodynamics::property_table::PropertyTable;
use log::{SetLoggerError, error, warn};
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use std::env;
use std::process::ExitCode;

const TEMPERATURES: [f64; 6] = [200.0, 298.15, 500.0, 1000.0, 2000.0, 3000.0];

/// `ThermoInp <path to thermo.inp> [species ...]`: property tables, all species if none named
fn run(path: &str, names: &[String]) -> ThermoInpResult<()> {
    let source = ThermoInpDB::from_file(path)?;
    let mut db = ChemDB::load(&source, PhysicalConstants::default())?;
    if names.is_empty() {
        db.select_all();
    } else {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        db.select(&names)?;
    }
    for name in db.names() {
        let species = db.get(name)?;
        let Some((t_min, t_max)) = species.bounds() else {
            println!("{}: no temperature intervals", name);
            continue;
        };
        let temperatures: Vec<f64> = TEMPERATURES
            .into_iter()
            .filter(|t| (t_min..=t_max).contains(t))
            .collect();
        PropertyTable::new(&temperatures, species)?.print();
    }
    Ok(())
}

/// Terminal logger, or plain stdout logging when no terminal logger can be installed
fn init_logger() -> Result<(), SetLoggerError> {
    let Err(term_error) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) else {
        return Ok(());
    };
    SimpleLogger::init(LevelFilter::Info, Config::default())?;
    warn!("terminal logger unavailable ({}), logging to stdout", term_error);
    Ok(())
}

pub fn main() -> ExitCode {
    if let Err(e) = init_logger() {
        eprintln!("logging disabled: {}", e);
    }
    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.split_first() {
        Some((path, names)) => run(path, names),
        None => (0..=3).try_for_each(thermoinp_examples),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logger_init_is_reported() {
        let _ = init_logger();
        assert!(init_logger().is_err());
    }
}
