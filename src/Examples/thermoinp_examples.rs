#![allow(non_snake_case)]
use crate::SAMPLE_DATABASE;
use crate::Thermodynamics::DBhandlers::refcode::describe_refcode;
use crate::Thermodynamics::DBhandlers::thermoinp_db::ThermoInpDB;
use crate::Thermodynamics::DBhandlers::thermoinp_error::ThermoInpResult;
use crate::Thermodynamics::DBhandlers::thermoinp_tokenizer::Category;
use crate::Thermodynamics::NASA9_sym::create_sym_Cp_dH_dS;
use crate::Thermodynamics::chem_db::ChemDB;
use crate::Thermodynamics::constants::PhysicalConstants;
use crate::Thermodynamics::property_table::PropertyTable;
use crate::Thermodynamics::thermo_state::ThermoState;

pub fn thermoinp_examples(task: usize) -> ThermoInpResult<()> {
    let source = ThermoInpDB::parse(SAMPLE_DATABASE)?;
    let constants = PhysicalConstants::default();
    match task {
        0 => {
            // browsing the database
            for (category, names) in source.list_species() {
                println!("{}: {:?}", category, names);
            }
            for species in source.lookup("N2", false) {
                println!(
                    "{:<10} {:<20} Mr = {:>10.5}  intervals: {}",
                    species.name,
                    species.formula,
                    species.molar_mass,
                    species.nintervals()
                );
                println!("{}", describe_refcode(&species.refcode));
            }
            let subset = source.create_subset(&["N2"], Some(Category::GasProducts), false)?;
            println!("{}", subset);
        }
        1 => {
            // property tables
            let mut db = ChemDB::load(&source, constants)?;
            db.select(&["Air", "CO2", "H2O"])?;
            for name in db.names() {
                let table = PropertyTable::new(&[200.0, 298.15, 500.0, 1000.0, 2000.0], db.get(name)?)?;
                table.print();
                println!("{}\n", table.formatted());
            }
        }
        2 => {
            // state of one species at changing temperature
            let mut state = ThermoState::from_record(source.get("H2O")?, &constants, 298.15)?;
            for T in [300.0, 1000.0, 1500.0, 3000.0] {
                state.set_temperature(T)?;
                println!(
                    "T = {:>7.1} K, interval {}: Cp = {:.3} J/mol-K, H = {:.1} J/mol, S = {:.3} J/mol-K, cp = {:.1} J/kg-K",
                    state.T(),
                    state.active_index(),
                    state.Cp(),
                    state.H(),
                    state.S(),
                    state.cp()
                );
            }
            if let Err(e) = state.set_temperature(7000.0) {
                println!("{}", e);
            }
            let (Cp, dh, ds) = create_sym_Cp_dH_dS(state.active_interval(), constants.R_CEA);
            println!("Cp(T) = {}\nH(T) = {}\nS(T) = {}", Cp, dh, ds);
        }
        3 => {
            // JSON export
            let mut db = ChemDB::load(&source, constants)?;
            db.select(&["Ar", "RP-1"])?;
            db.write_to(std::io::stdout())?;
        }
        _ => println!("no example {}", task),
    }
    Ok(())
}
