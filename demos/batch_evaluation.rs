use formulix_rs::FormulaCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
        HashMap::from([("price".to_string(), 80.0), ("volume".to_string(), 6000.0)]),
        HashMap::from([("price".to_string(), 80.0)]),
    ];

    let expression = "price * volume / 1000";

    let mut cache = FormulaCache::new(NonZeroUsize::new(16).unwrap());
    for (i, context) in contexts.iter().enumerate() {
        let result = cache
            .get_or_compile(expression)
            .map_err(|err| err.to_string())
            .and_then(|formula| formula.eval(context).map_err(|err| err.to_string()));
        println!("Result {}: {:?}", i, result);
    }
}
