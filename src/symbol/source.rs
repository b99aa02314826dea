//! Source of symbols. Every symbol is backed by an interned name.

use std::cell::Cell;
use std::fmt;

use elsa::FrozenIndexSet;

use super::Symbol;

/// An append-only table of symbol names.
///
/// Interning takes `&self`, so grammar snapshots that share a source can
/// keep handing out references to names they already resolved.
pub struct SymbolSource {
    names: FrozenIndexSet<String>,
    num_syms: Cell<usize>,
}

impl Default for SymbolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource {
    /// Creates a source of symbols with an empty symbol space.
    pub fn new() -> Self {
        SymbolSource {
            names: FrozenIndexSet::new(),
            num_syms: Cell::new(0),
        }
    }

    /// Returns the symbol for the given name, interning it if it was
    /// never seen before.
    pub fn intern(&self, name: impl AsRef<str>) -> Symbol {
        let name = name.as_ref();
        if let Some((id, _)) = self.names.get_full(name) {
            return Symbol::from(id);
        }
        let (id, _) = self.names.insert_full(name.to_string());
        self.num_syms.set(self.num_syms.get().max(id + 1));
        Symbol::from(id)
    }

    /// Returns generated symbols, one per name.
    pub fn sym<const N: usize>(&self, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.intern(name))
    }

    /// Looks up a name without interning it.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.names.get_full(name).map(|(id, _)| Symbol::from(id))
    }

    /// Returns the name of a symbol.
    ///
    /// Symbols are only created by interning, so every symbol of this source
    /// has a name. A symbol from a different source yields `"?"`.
    pub fn name_of(&self, sym: Symbol) -> &str {
        self.names.get_index(sym.usize()).unwrap_or("?")
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.num_syms.get()
    }

    /// Iterates over all symbols in use, in the order of interning.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> {
        (0..self.num_syms()).map(Symbol::from)
    }
}

impl fmt::Debug for SymbolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.symbols().map(|sym| self.name_of(sym)))
            .finish()
    }
}
