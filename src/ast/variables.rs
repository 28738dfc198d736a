use crate::ast::Token;

/// Lists every variable token in source order. Repeats are kept: `a*a` yields `["a", "a"]`.
pub fn extract_variables(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Variable(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::tokenize;

    fn variables(input: &str) -> Vec<String> {
        extract_variables(&tokenize(input).unwrap())
    }

    #[test]
    fn test_source_order() {
        assert_eq!(variables("b + a * c"), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_repeats_are_kept() {
        assert_eq!(variables("x * x + y - x"), vec!["x", "x", "y", "x"]);
    }

    #[test]
    fn test_no_variables() {
        assert!(variables("(1 + 2) * 3").is_empty());
    }

    #[test]
    fn test_braced_names() {
        assert_eq!(variables("{a[n]}+{a[i]}"), vec!["a[n]", "a[i]"]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(variables("X + x"), vec!["X", "x"]);
    }
}
