//! Evaluating a bound formula across a run of integer inputs, the way a plot walks the
//! visible x range one unit at a time.

use crate::ast::BoundFormula;
use log::debug;
use rayon::prelude::*;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Evaluates `bound` at every integer in `range`, in order.
///
/// Non-finite results (division by zero and the like) are returned as they are.
pub fn sample(bound: &BoundFormula<'_>, range: Range<i64>) -> Vec<Sample> {
    debug!(
        "Sampling '{}' over {} in {:?}",
        bound.formula().source(),
        bound.variable(),
        range
    );
    range.map(|x| sample_at(bound, x)).collect()
}

/// Parallel version of [`sample`]. The result is in the same order.
pub fn par_sample(bound: &BoundFormula<'_>, range: Range<i64>) -> Vec<Sample> {
    debug!(
        "Sampling '{}' over {} in {:?} on {} threads",
        bound.formula().source(),
        bound.variable(),
        range,
        rayon::current_num_threads()
    );
    range.into_par_iter().map(|x| sample_at(bound, x)).collect()
}

fn sample_at(bound: &BoundFormula<'_>, x: i64) -> Sample {
    let x = x as f64;
    Sample { x, y: bound.call(x) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use std::collections::HashMap;

    #[test]
    fn test_sample_line() {
        let formula = compile("2 * x + 1").unwrap();
        let f = formula.bind("x", HashMap::new()).unwrap();

        let samples = sample(&f, -2..3);
        let expected: Vec<Sample> = [(-2.0, -3.0), (-1.0, -1.0), (0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]
            .iter()
            .map(|&(x, y)| Sample { x, y })
            .collect();
        assert_eq!(samples, expected);
    }

    #[test]
    fn test_empty_range() {
        let formula = compile("x").unwrap();
        let f = formula.bind("x", HashMap::new()).unwrap();
        assert!(sample(&f, 5..5).is_empty());
        assert!(par_sample(&f, 5..5).is_empty());
    }

    #[test]
    fn test_non_finite_values_are_kept() {
        let formula = compile("1 / x").unwrap();
        let f = formula.bind("x", HashMap::new()).unwrap();

        let samples = sample(&f, -1..2);
        assert_eq!(samples[0].y, -1.0);
        assert_eq!(samples[1].y, f64::INFINITY);
        assert_eq!(samples[2].y, 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let formula = compile("a * x ^ 2 - b * x + {c 0}").unwrap();
        let fixed = HashMap::from([
            ("a".to_string(), 0.5),
            ("b".to_string(), 3.0),
            ("c 0".to_string(), -7.0),
        ]);
        let f = formula.bind("x", fixed).unwrap();

        let sequential = sample(&f, -500..500);
        let parallel = par_sample(&f, -500..500);
        assert_eq!(sequential.len(), 1000);
        assert_eq!(sequential, parallel);
    }
}
