use crate::ast::ASTNode;
use crate::error::EvalError;
use std::collections::{HashMap, HashSet};

/// Checks that `bindings` names exactly the variables in `required`.
///
/// Missing names are reported first, in source order. Of several unknown names the
/// lexicographically smallest is reported. A name that occurs more than once in `required`
/// still needs only one binding.
pub fn check_bindings(required: &[String], bindings: &HashMap<String, f64>) -> Result<(), EvalError> {
    check_bindings_except(required, bindings, None)
}

/// Same as [`check_bindings`], but `free` is left unbound: it must not appear in `bindings`
/// and is not reported as missing.
pub(crate) fn check_bindings_except(
    required: &[String],
    bindings: &HashMap<String, f64>,
    free: Option<&str>,
) -> Result<(), EvalError> {
    if let Some(missing) = required
        .iter()
        .filter(|name| Some(name.as_str()) != free)
        .find(|name| !bindings.contains_key(*name))
    {
        return Err(EvalError::MissingVariable(missing.clone()));
    }

    let known: HashSet<&str> = required.iter().map(String::as_str).collect();
    if let Some(unknown) = bindings
        .keys()
        .filter(|name| !known.contains(name.as_str()) || Some(name.as_str()) == free)
        .min()
    {
        return Err(EvalError::UnknownVariable(unknown.clone()));
    }

    Ok(())
}

/// Validates `bindings` against `required`, then evaluates `tree`.
///
/// `required` must list every variable in `tree`, as a [`Formula`](crate::Formula) does.
/// Nothing is evaluated when the bindings are rejected.
pub(crate) fn evaluate(
    tree: &ASTNode,
    required: &[String],
    bindings: &HashMap<String, f64>,
) -> Result<f64, EvalError> {
    check_bindings(required, bindings)?;
    // Every variable in the tree is in `required`, so the fallback is never taken.
    Ok(tree.evaluate_with(&|name: &str| bindings.get(name).copied().unwrap_or(f64::NAN)))
}
