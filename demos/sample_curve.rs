use formulix_rs::{compile, sampling};
use std::collections::HashMap;
use std::env::args;

const USAGE: &str = r"Print the values of a formula of `x` for x in -10..=10.

Usage: sample_curve EXPR [NAME=VALUE ...]

Example: sample_curve 'k * x ^ 2' k=0.5";

fn main() {
    pretty_env_logger::init();

    let mut args = args().skip(1);
    let Some(expr) = args.next() else {
        return println!("{}", USAGE);
    };

    let mut fixed = HashMap::new();
    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            return println!("Expected NAME=VALUE, got `{}`", arg);
        };
        match value.parse::<f64>() {
            Ok(value) => fixed.insert(name.to_string(), value),
            Err(e) => return println!("Invalid value for `{}`: {}", name, e),
        };
    }

    let formula = match compile(&expr) {
        Ok(formula) => formula,
        Err(e) => return println!("Error when compiling `{}`: {}", expr, e),
    };
    let f = match formula.bind("x", fixed) {
        Ok(f) => f,
        Err(e) => return println!("Error when trying to bind `x` in {}: {}", expr, e),
    };

    for point in sampling::par_sample(&f, -10..11) {
        println!("{:>4} {}", point.x, point.y);
    }
}
