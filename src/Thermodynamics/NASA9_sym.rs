//! Symbolic expressions and closures for Cp, H and S of one temperature interval.
//! The symbolic forms (variable `T`) can be differentiated, printed or lambdified by the
//! RustedSciThe engine; the closures evaluate the same polynomials numerically.
#![allow(non_snake_case)]
use crate::Thermodynamics::DBhandlers::NASA9_interval::TemperatureInterval;
use crate::Thermodynamics::NASA9_poly::{
    dimensionless_enthalpy, dimensionless_entropy, dimensionless_heat_capacity,
};
use RustedSciThe::symbolic::symbolic_engine::Expr;

fn consts(interval: &TemperatureInterval) -> [Expr; 7] {
    interval.coefficients.map(Expr::Const)
}

/// Cp = R (a1 T^-2 + a2 T^-1 + a3 + a4 T + a5 T^2 + a6 T^3 + a7 T^4), J/mol-K when R is molar
pub fn Cp_sym(interval: &TemperatureInterval, R: f64) -> Expr {
    let t = Expr::Var("T".to_owned());
    let [a1, a2, a3, a4, a5, a6, a7] = consts(interval);
    Expr::Const(R)
        * (a1 / t.clone().pow(Expr::Const(2.0))
            + a2 / t.clone()
            + a3
            + a4 * t.clone()
            + a5 * t.clone().pow(Expr::Const(2.0))
            + a6 * t.clone().pow(Expr::Const(3.0))
            + a7 * t.pow(Expr::Const(4.0)))
}

/// H = R T (H/RT)
pub fn dh_sym(interval: &TemperatureInterval, R: f64) -> Expr {
    let t = Expr::Var("T".to_owned());
    let [a1, a2, a3, a4, a5, a6, a7] = consts(interval);
    let b1 = Expr::Const(interval.integration_constants.0);
    Expr::Const(R)
        * (Expr::Const(0.0) - a1 / t.clone()
            + a2 * t.clone().ln()
            + b1
            + a3 * t.clone()
            + a4 * t.clone().pow(Expr::Const(2.0)) / Expr::Const(2.0)
            + a5 * t.clone().pow(Expr::Const(3.0)) / Expr::Const(3.0)
            + a6 * t.clone().pow(Expr::Const(4.0)) / Expr::Const(4.0)
            + a7 * t.pow(Expr::Const(5.0)) / Expr::Const(5.0))
}

/// S = R (S/R)
pub fn ds_sym(interval: &TemperatureInterval, R: f64) -> Expr {
    let t = Expr::Var("T".to_owned());
    let [a1, a2, a3, a4, a5, a6, a7] = consts(interval);
    let b2 = Expr::Const(interval.integration_constants.1);
    Expr::Const(R)
        * (Expr::Const(0.0)
            - a1 / (Expr::Const(2.0) * t.clone().pow(Expr::Const(2.0)))
            - a2 / t.clone()
            + a3 * t.clone().ln()
            + b2
            + a4 * t.clone()
            + a5 * t.clone().pow(Expr::Const(2.0)) / Expr::Const(2.0)
            + a6 * t.clone().pow(Expr::Const(3.0)) / Expr::Const(3.0)
            + a7 * t.pow(Expr::Const(4.0)) / Expr::Const(4.0))
}

/// simplified (Cp, H, S) expressions
pub fn create_sym_Cp_dH_dS(interval: &TemperatureInterval, R: f64) -> (Expr, Expr, Expr) {
    (
        Cp_sym(interval, R).simplify(),
        dh_sym(interval, R).simplify(),
        ds_sym(interval, R).simplify(),
    )
}

pub type PropertyFn = Box<dyn Fn(f64) -> f64>;

/// (Cp, H, S) as functions of T; NaN for temperatures that are not positive
pub fn create_closures(interval: &TemperatureInterval, R: f64) -> (PropertyFn, PropertyFn, PropertyFn) {
    let a = interval.coefficients;
    let (b1, b2) = interval.integration_constants;
    let Cp = move |T: f64| dimensionless_heat_capacity(T, &a).map_or(f64::NAN, |c| R * c);
    let dh = move |T: f64| dimensionless_enthalpy(T, &a, b1).map_or(f64::NAN, |h| R * T * h);
    let ds = move |T: f64| dimensionless_entropy(T, &a, b2).map_or(f64::NAN, |s| R * s);
    (Box::new(Cp), Box::new(dh), Box::new(ds))
}
