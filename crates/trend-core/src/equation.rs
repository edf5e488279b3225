// File: crates/trend-core/src/equation.rs
// Summary: Renders fitted coefficients as a typeset equation string ("y = 2x² - x + 0.5").

use crate::predict::PredictionFunction;
use crate::solver::Coefficients;
use crate::text::{format_decimal, superscript};
use crate::trendline::RegressionModel;

/// Decimals kept for every coefficient in an equation.
pub const EQUATION_DECIMALS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn of(v: f64) -> Self {
        if v < 0.0 { Sign::Negative } else { Sign::Positive }
    }
}

/// One signed summand; `body` carries no sign.
struct Term {
    sign: Sign,
    body: String,
}

/// Rounded magnitude, or `None` when it rounds to zero.
fn magnitude(v: f64) -> Option<String> {
    let s = format_decimal(v.abs(), EQUATION_DECIMALS);
    (s != "0").then_some(s)
}

/// Coefficient multiplying `var`; a unit coefficient is left implicit.
fn scaled(coef: f64, var: &str) -> Option<Term> {
    let m = magnitude(coef)?;
    let body = if m == "1" { var.to_string() } else { format!("{m}{var}") };
    Some(Term { sign: Sign::of(coef), body })
}

fn constant(v: f64) -> Option<Term> {
    Some(Term { sign: Sign::of(v), body: magnitude(v)? })
}

/// `y = t1 ± t2 ± …`; the first term carries a bare `-` when negative.
fn join(terms: impl IntoIterator<Item = Term>) -> String {
    let mut out = String::from("y = ");
    let mut first = true;
    for term in terms {
        match (first, term.sign) {
            (true, Sign::Negative) => out.push('-'),
            (true, Sign::Positive) => {}
            (false, Sign::Negative) => out.push_str(" - "),
            (false, Sign::Positive) => out.push_str(" + "),
        }
        out.push_str(&term.body);
        first = false;
    }
    if first {
        out.push('0');
    }
    out
}

/// Exponent text for `e^(…)` / `x^(…)`: `None` when it rounds to zero.
fn exponent(v: f64, var: &str) -> Option<String> {
    let m = magnitude(v)?;
    let sign = if v < 0.0 { "-" } else { "" };
    Some(if m == "1" { format!("{sign}{var}") } else { format!("{sign}{m}{var}") })
}

/// Coefficient times a named factor, joined with `·` (`3·ln(x)`, `e^(x)`).
fn product(coef: f64, factor: &str) -> Option<Term> {
    let m = magnitude(coef)?;
    let body = if m == "1" { factor.to_string() } else { format!("{m}·{factor}") };
    Some(Term { sign: Sign::of(coef), body })
}

/// Format the equation of a fitted model.
pub fn format_equation(model: RegressionModel, b: &Coefficients) -> String {
    match model {
        RegressionModel::Polynomial { .. } => {
            let terms = b.as_slice().iter().enumerate().rev().filter_map(|(power, &c)| match power {
                0 => constant(c),
                1 => scaled(c, "x"),
                _ => scaled(c, &format!("x{}", superscript(power))),
            });
            join(terms)
        }
        RegressionModel::Exponential => {
            let a = b.b(1).exp();
            match exponent(b.b(2), "x") {
                Some(e) => join(product(a, &format!("e^({e})"))),
                None => join(constant(a)),
            }
        }
        RegressionModel::Logarithmic => join(product(b.b(2), "ln(x)").into_iter().chain(constant(b.b(1)))),
        RegressionModel::Power => {
            let a = b.b(1).exp();
            let power = format_decimal(b.b(2), EQUATION_DECIMALS);
            let factor = match power.parse::<usize>() {
                Ok(0) => return join(constant(a)),
                Ok(1) => "x".to_string(),
                Ok(k) => format!("x{}", superscript(k)),
                Err(_) => format!("x^({power})"),
            };
            join(product(a, &factor))
        }
    }
}

impl PredictionFunction {
    /// Equation text of this curve, e.g. `y = 3·e^(0.5x)`.
    pub fn equation(&self) -> String {
        format_equation(self.model(), self.coefficients())
    }
}
