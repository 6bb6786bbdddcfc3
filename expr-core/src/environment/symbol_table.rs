use std::collections::HashMap;

use super::prelude::{Value, ValueType};

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub value_type: ValueType,
    pub value: Value,
}

/// Session-wide variable bindings. Names are unique; entries are only
/// removed by an explicit [`SymbolTable::clear`].
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SymbolTable {
    store: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<(ValueType, Value)> {
        self.store.get(name)
            .map(|symbol| (symbol.value_type, symbol.value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Creates the entry on first assignment, overwrites it afterwards.
    /// Returns the previous binding, if any.
    pub fn declare_or_update(
        &mut self,
        name: impl Into<String>,
        value_type: ValueType,
        value: Value
    ) -> Option<Symbol> {
        let name = name.into();

        self.store.insert(name.clone(), Symbol {
            name,
            value_type,
            value,
        })
    }

    /// Bindings in name order.
    pub fn entries(&self) -> Vec<&Symbol> {
        let mut entries = self.store.values().collect::<Vec<&Symbol>>();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        entries
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}
