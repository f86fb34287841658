//! Import collection for external type references.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Modules keep their first-seen order; symbols within a module are sorted.
///
/// # Example
///
/// ```
/// use hgen_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("./time", "Instant");
/// imports.add("./money", "Money");
/// imports.add("./time", "Duration");
///
/// let rendered: Vec<String> = imports
///     .iter()
///     .map(|(module, symbols)| {
///         let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
///         format!("import {{ {} }} from '{}';", symbols.join(", "), module)
///     })
///     .collect();
///
/// assert_eq!(
///     rendered,
///     [
///         "import { Duration, Instant } from './time';",
///         "import { Money } from './money';",
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> set of symbols (sorted for deterministic output)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Check if a specific symbol is imported from a module.
    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_deduplicated() {
        let mut imports = ImportCollector::new();
        imports.add("super::external", "Instant");
        imports.add("super::external", "Instant");

        assert_eq!(imports.len(), 1);
        assert!(imports.has_symbol("super::external", "Instant"));
        assert!(!imports.has_symbol("super::external", "Money"));
    }
}
