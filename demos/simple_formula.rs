use formulix_rs::compile;
use log::debug;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let formula = match compile("n1 + n2 * n3") {
        Ok(formula) => formula,
        Err(err) => return eprintln!("Error: {}", err),
    };
    debug!("compiled: {formula:?}");

    println!("Formula: {}", formula);
    println!("Variables: {:?}", formula.distinct_variables());

    let bindings = HashMap::from([
        ("n1".to_string(), 2.0),
        ("n2".to_string(), 3.0),
        ("n3".to_string(), 4.0),
    ]);
    match formula.eval(&bindings) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
