use crate::ast::{Compiler, Formula};
use crate::error::CompileError;
use log::{debug, trace};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Keeps recently compiled formulas by their source text, so hosts that recompile on every
/// edit only pay for text they have not seen recently. Failed compilations are not kept.
pub struct FormulaCache {
    compiler: Compiler,
    formulas: LruCache<String, Arc<Formula>>,
}

impl FormulaCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_compiler(capacity, Compiler::new())
    }

    pub fn with_compiler(capacity: NonZeroUsize, compiler: Compiler) -> Self {
        Self {
            compiler,
            formulas: LruCache::new(capacity),
        }
    }

    pub fn get_or_compile(&mut self, expression: &str) -> Result<Arc<Formula>, CompileError> {
        if let Some(formula) = self.formulas.get(expression) {
            trace!("Cache hit for '{}'", expression);
            return Ok(Arc::clone(formula));
        }

        debug!("Cache miss for '{}'", expression);
        let formula = Arc::new(self.compiler.compile(expression)?);
        self.formulas
            .put(expression.to_string(), Arc::clone(&formula));
        Ok(formula)
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.formulas.contains(expression)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.formulas.cap()
    }

    pub fn clear(&mut self) {
        self.formulas.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> FormulaCache {
        FormulaCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_repeated_lookup_shares_formula() {
        let mut cache = cache(4);
        let first = cache.get_or_compile("a + b").unwrap();
        let second = cache.get_or_compile("a + b").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let mut cache = cache(2);
        cache.get_or_compile("1").unwrap();
        cache.get_or_compile("2").unwrap();
        // Touch "1" so "2" becomes the eviction candidate.
        cache.get_or_compile("1").unwrap();
        cache.get_or_compile("3").unwrap();

        assert!(cache.contains("1"));
        assert!(!cache.contains("2"));
        assert!(cache.contains("3"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity().get(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = cache(2);
        assert!(cache.get_or_compile("(1 + 2").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cache = cache(2);
        cache.get_or_compile("x").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
